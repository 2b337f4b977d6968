use crate::report::{run_score_report, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use net_benefit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Net Benefit Calculator",
    about = "Weigh clinical outcomes and feasibility constraints into a net benefit signal",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score an outcome table export and print the report
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score_report(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use net_benefit::scoring::{Severity, WeightingScheme};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn score_subcommand_parses_conventions() {
        let cli = Cli::try_parse_from([
            "net-benefit",
            "score",
            "outcomes.csv",
            "--scheme",
            "r",
            "--care",
            "0.5",
            "--json",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.scheme, Some(WeightingScheme::MaxNormalized));
                assert_eq!(args.care, Severity::Moderate);
                assert_eq!(args.financial, Severity::None);
                assert!(args.json);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn score_subcommand_rejects_off_level_severity() {
        let parsed = Cli::try_parse_from(["net-benefit", "score", "outcomes.csv", "--access", "0.3"]);
        assert!(parsed.is_err());
    }
}
