use crate::api::engineer::EngineerApi;
use crate::cli::{CliError, parse_time};
use crate::domain::Id;
use crate::notice::Notice;
use crate::render::table;
use crate::workflow::assignment::AssignmentWorkflow;
use chrono::{NaiveDate, NaiveTime};
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum EngineerCommand {
    /// Pending assignments, active tickets and weekly stats.
    Dashboard,

    /// Reasons accepted when declining an assignment.
    Reasons,

    /// Accept a pending assignment.
    Accept { ticket: Id },

    /// Decline a pending assignment.
    Decline {
        ticket: Id,
        /// Code of one of the listed decline reasons.
        #[arg(long)]
        reason: String,
        #[arg(long)]
        detail: Option<String>,
    },

    /// Open and blocked one-hour slots of a day.
    Slots {
        #[arg(long)]
        date: NaiveDate,
    },

    /// Accept a pending assignment and propose another time.
    Reschedule {
        ticket: Id,
        #[arg(long)]
        date: NaiveDate,
        /// Start of an open slot (HH:MM).
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,
        #[arg(long)]
        notes: Option<String>,
    },
}

pub async fn run<A: EngineerApi>(command: EngineerCommand, api: A, today: NaiveDate) -> Result<(), CliError> {
    let workflow = AssignmentWorkflow::new(api);
    if !matches!(command, EngineerCommand::Slots { .. }) {
        workflow.load().await?;
    }

    let message = match command {
        EngineerCommand::Dashboard => {
            print_dashboard(&workflow, today);
            return Ok(());
        }
        EngineerCommand::Reasons => {
            for reason in workflow.decline_reasons() {
                let detail = if reason.requires_detail { " (detail required)" } else { "" };
                println!("{:<20}{}{}", reason.code, reason.label, detail);
            }
            return Ok(());
        }
        EngineerCommand::Slots { date } => {
            let grid = workflow.slots(date).await?;
            println!(
                "Working hours {} - {}",
                grid.working_hours.start.format("%H:%M"),
                grid.working_hours.end.format("%H:%M")
            );
            println!("{}", table(&grid.slots, today));
            return Ok(());
        }
        EngineerCommand::Accept { ticket } => {
            workflow.accept(&ticket).await?;
            format!("Ticket {} accepted", ticket)
        }
        EngineerCommand::Decline { ticket, reason, detail } => {
            workflow.decline(&ticket, &reason, detail.as_deref()).await?;
            format!("Ticket {} declined", ticket)
        }
        EngineerCommand::Reschedule {
            ticket,
            date,
            start,
            notes,
        } => {
            let grid = workflow.slots(date).await?;
            let selection = workflow.reschedule(&ticket, &grid, start, notes.as_deref()).await?;
            format!(
                "Ticket {} accepted, proposed {} - {}",
                ticket,
                selection.start.format("%Y-%m-%d %H:%M"),
                selection.end.format("%Y-%m-%d %H:%M")
            )
        }
    };

    Notice::success(message).emit();
    Ok(())
}

fn print_dashboard<A: EngineerApi>(workflow: &AssignmentWorkflow<A>, today: NaiveDate) {
    let stats = workflow.stats();
    println!(
        "{} visits today, {} completed this week, {} open tickets",
        stats.visits_today, stats.completed_this_week, stats.open_tickets
    );
    println!();

    let pending = workflow.pending();
    println!("Pending acceptance");
    println!("{}", table(pending.iter().map(|assignment| &assignment.ticket), today));
    println!();
    println!("Active tickets");
    println!("{}", table(&workflow.active_tickets(), today));
}
