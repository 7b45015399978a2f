use clap::Parser;
use smart_money::api::{self, Cli, Command};

#[tokio::main]
async fn main() {
    smart_money::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Plan(args) => match api::run_plan_command(args) {
            Ok(report) => print!("{report}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        Command::Rates { rates_file } => print!("{}", api::run_rates_command(rates_file)),
        Command::Serve(args) => {
            if let Err(e) = api::run_http_server(args).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
    }
}
