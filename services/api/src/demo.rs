use crate::infra::{
    parse_sort, parse_status, seed_repository, InMemoryApplicationRepository, DEMO_COLLAB,
};
use backlot::applicants::{
    ApplicantBoardService, ApplicantFilter, ApplicantImporter, ApplicantView, Application,
    ApplicationId, ApplicationStatus, SortMode, StatusBoard, StatusUpdate, ViewLayout, ViewQuery,
};
use backlot::config::RankingConfig;
use backlot::error::AppError;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// CSV export with id,status,match_score,is_promoted,created_at and profile columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Sort mode: score, date, or name (defaults to BACKLOT_DEFAULT_SORT, else score)
    #[arg(long, value_parser = parse_sort)]
    pub(crate) sort: Option<SortMode>,
    /// Only show applications in this status
    #[arg(long, value_parser = parse_status)]
    pub(crate) status: Option<ApplicationStatus>,
    /// Case-insensitive text search over names and cover notes
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Only show promoted applications
    #[arg(long)]
    pub(crate) promoted_only: bool,
    /// Hide applications scored below this value
    #[arg(long)]
    pub(crate) min_score: Option<f64>,
    /// Print the status board instead of the flat list
    #[arg(long)]
    pub(crate) board: bool,
    /// Emit the view as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the status board instead of the flat list
    #[arg(long)]
    pub(crate) board: bool,
    /// Sort mode used for the demo listing (defaults to BACKLOT_DEFAULT_SORT, else score)
    #[arg(long, value_parser = parse_sort)]
    pub(crate) sort: Option<SortMode>,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let applications = ApplicantImporter::from_path(&args.csv)?;
    let query = rank_query(&args, RankingConfig::from_env()?);

    let view = ApplicantView::build(&applications, &query);

    if args.json {
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("View payload unavailable: {err}"),
        }
        return Ok(());
    }

    println!(
        "{} applications loaded from {} ({} shown, sorted by {})",
        view.counts.total,
        args.csv.display(),
        view.applications.len(),
        view.sort.as_str()
    );
    render_view(&view);
    Ok(())
}

fn rank_query(args: &RankArgs, ranking: RankingConfig) -> ViewQuery {
    ViewQuery {
        sort: args.sort.unwrap_or(ranking.default_sort),
        filter: ApplicantFilter {
            status: args.status,
            promoted_only: args.promoted_only,
            min_score: args.min_score,
            search: args.search.clone(),
        },
        layout: if args.board {
            ViewLayout::Board
        } else {
            ViewLayout::List
        },
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let ranking = RankingConfig::from_env()?;
    let repository = Arc::new(InMemoryApplicationRepository::default());
    if let Err(err) = seed_repository(&repository) {
        println!("Demo seed failed: {err}");
        return Ok(());
    }
    let service = ApplicantBoardService::new(repository, ranking);

    let mut query = ViewQuery::sorted_by(args.sort.unwrap_or(service.default_sort()));
    if args.board {
        query = query.board();
    }

    println!("Collab applicant demo ({DEMO_COLLAB})");
    let view = match service.view(DEMO_COLLAB, &query) {
        Ok(view) => view,
        Err(err) => {
            println!("  Applicant view unavailable: {err}");
            return Ok(());
        }
    };
    render_view(&view);

    let Some(candidate) = view
        .applications
        .iter()
        .find(|application| application.known_status() == Some(ApplicationStatus::Shortlisted))
    else {
        println!("\nNo shortlisted applicant to move forward");
        return Ok(());
    };

    println!(
        "\nMoving {} to interview",
        candidate.preferred_name().unwrap_or(&candidate.id.0)
    );
    let id: ApplicationId = candidate.id.clone();
    match service.update_status(
        &id,
        StatusUpdate {
            status: ApplicationStatus::Interview.as_str().to_string(),
        },
    ) {
        Ok(change) => println!(
            "- {} -> {}",
            change.previous.as_str(),
            change.current.label()
        ),
        Err(err) => {
            println!("  Status update rejected: {err}");
            return Ok(());
        }
    }

    if let Ok(refreshed) = service.view(DEMO_COLLAB, &query.clone().board()) {
        if let Some(board) = &refreshed.board {
            println!("\nBoard after update");
            render_board(board);
        }
    }

    Ok(())
}

fn render_view(view: &ApplicantView) {
    println!("Status counts:");
    for status in ApplicationStatus::ALL {
        println!("  - {}: {}", status.label(), view.counts.count(status));
    }
    if view.counts.unrecognized > 0 {
        println!("  - Unrecognized: {}", view.counts.unrecognized);
    }

    match &view.board {
        Some(board) => render_board(board),
        None => render_list(&view.applications),
    }
}

fn render_list(applications: &[Application]) {
    println!("\nApplicants");
    if applications.is_empty() {
        println!("  (none)");
        return;
    }
    for (position, application) in applications.iter().enumerate() {
        println!("  {:>2}. {}", position + 1, describe(application));
    }
}

fn render_board(board: &StatusBoard) {
    for column in &board.columns {
        println!(
            "\n[{}] {} ({})",
            column.color,
            column.label,
            column.applications.len()
        );
        for application in &column.applications {
            println!("  - {}", describe(application));
        }
    }

    if !board.unrecognized.is_empty() {
        println!("\nUnrecognized status ({})", board.unrecognized.len());
        for application in &board.unrecognized {
            println!(
                "  - {} (status '{}')",
                describe(application),
                application.status.as_str()
            );
        }
    }
}

fn describe(application: &Application) -> String {
    let name = application.preferred_name().unwrap_or("(unnamed)");
    let score = match application.match_score {
        Some(score) => format!("{score:.0}"),
        None => "--".to_string(),
    };
    let promoted = if application.is_promoted {
        " [promoted]"
    } else {
        ""
    };
    let submitted = application
        .submitted_at()
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown date".to_string());

    format!(
        "{} | {} | score {} | {} | {}{}",
        application.id,
        name,
        score,
        application.status.as_str(),
        submitted,
        promoted
    )
}
