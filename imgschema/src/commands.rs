use clap::{arg, command};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

/// Extraction rule flags shared by `generate` and `extract`
fn rule_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        arg!(--"config" <PATH>)
            .required(false)
            .help("JSON file with extraction rules and HTTP settings (~ is expanded)"),
    )
    .arg(
        arg!(--"scope" <CSS>)
            .required(false)
            .help("Only look for images inside the first element matching this CSS selector"),
    )
    .arg(
        arg!(--"deny" <SUBSTRING>)
            .required(false)
            .help(
                "Skip images whose src contains this text (repeatable, replaces the \
                default 'blurred' and 'googleusercontent.com' rules)",
            )
            .action(clap::ArgAction::Append),
    )
    .arg(
        arg!(--"alt-prefix" <PREFIX>)
            .required(false)
            .help("Prefix stripped once from alt text (default: 'Writer: ')")
            .conflicts_with("no-alt-prefix"),
    )
    .arg(
        arg!(--"no-alt-prefix")
            .required(false)
            .help("Keep alt text exactly as found")
            .action(clap::ArgAction::SetTrue),
    )
}

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("imgschema")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("imgschema")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(arg!(-v --"verbose" "Log every fetch and skipped image").required(false))
        .subcommand_required(false)
        .subcommand(rule_args(
            command!("generate")
                .about(
                    "Fetch each page, collect its <img> tags and write a CSV of \
                schema.org ImageObject JSON-LD, one row per URL.",
                )
                .arg(
                    arg!(-c --"csv" <PATH>)
                        .required(false)
                        .help("CSV file with a lowercase 'url' column")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with_all(["text", "url"]),
                )
                .arg(
                    arg!(-t --"text" <PATH>)
                        .required(false)
                        .help("Text file with one URL per line")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with_all(["csv", "url"]),
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("A page to process (repeatable). Reads stdin when no input is given")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Directory or file to write the CSV to")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .default_value("."),
                )
                .arg(
                    arg!(--"stdout")
                        .required(false)
                        .help("Also write the CSV to stdout")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"mobile-crawler")
                        .required(false)
                        .help("Send a Googlebot smartphone User-Agent")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"user-agent" <UA>)
                        .required(false)
                        .help("Send this User-Agent (overrides --mobile-crawler)"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds (default: 30)")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"fail-fast")
                        .required(false)
                        .help("Abort the whole batch on the first page that cannot be fetched")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"no-progress")
                        .required(false)
                        .help("Print one line per page instead of a progress bar")
                        .action(clap::ArgAction::SetTrue),
                ),
        ))
        .subcommand(rule_args(
            command!("extract")
                .about("Run the extraction rules on a saved HTML file and print its JSON-LD")
                .arg(
                    arg!(<HTML_FILE>)
                        .help("Path to the saved page")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The page's URL, recorded in the schema"),
                ),
        ))
}
