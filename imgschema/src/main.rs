use imgschema::commands::command_argument_builder;
use imgschema::handlers::{handle_extract, handle_generate, init_tracing};
use imgschema_core::print_banner;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    init_tracing(chosen_command.get_flag("verbose"));

    match chosen_command.subcommand() {
        Some(("generate", primary_command)) => handle_generate(primary_command, quiet).await,
        Some(("extract", primary_command)) => handle_extract(primary_command),
        _ => unreachable!("clap should ensure we don't get here"),
    }
}
