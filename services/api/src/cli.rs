use crate::demo::{run_demo, run_rank, DemoArgs, RankArgs};
use crate::server;
use backlot::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Backlot Applicants",
    about = "Rank collab applicants and serve the applicant board API",
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
    /// Work with applicant exports
    Applicants {
        #[command(subcommand)]
        command: ApplicantsCommand,
    },
    /// Rank a built-in crew call and walk one status change through the service
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ApplicantsCommand {
    /// Rank a CSV export and print the list or board
    Rank(RankArgs),
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
        Command::Applicants {
            command: ApplicantsCommand::Rank(args),
        } => run_rank(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backlot::applicants::{ApplicationStatus, SortMode};

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["backlot-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn rank_command_parses_sort_and_filters() {
        let cli = Cli::try_parse_from([
            "backlot-api",
            "applicants",
            "rank",
            "--csv",
            "crew.csv",
            "--sort",
            "Name",
            "--status",
            "shortlisted",
            "--min-score",
            "40",
            "--board",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Applicants {
                command: ApplicantsCommand::Rank(args),
            }) => {
                assert_eq!(args.sort, Some(SortMode::Name));
                assert_eq!(args.status, Some(ApplicationStatus::Shortlisted));
                assert_eq!(args.min_score, Some(40.0));
                assert!(args.board);
                assert!(!args.json);
            }
            other => panic!("expected rank command, got {other:?}"),
        }
    }

    #[test]
    fn rank_command_rejects_unknown_sort() {
        let result = Cli::try_parse_from([
            "backlot-api",
            "applicants",
            "rank",
            "--csv",
            "crew.csv",
            "--sort",
            "rating",
        ]);
        assert!(result.is_err());
    }
}
