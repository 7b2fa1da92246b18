use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use campsite_console::config::AppConfig;
use campsite_console::models::{BookingAction, BookingStatus};
use campsite_console::services::api::{BookingApi, HttpBookingApi};
use campsite_console::services::console;
use campsite_console::services::roster::BookingRoster;
use campsite_console::services::workflow::{ActionWorkflow, ReasonAction, SubmitRequest};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Missing base URL or token is fatal; there is nothing to retry.
    let config = AppConfig::from_env()?;
    tracing::info!(api_url = %config.api_url, "campsite admin console starting");
    let api = HttpBookingApi::new(&config);

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    run(&api, &mut input).await
}

async fn run(api: &dyn BookingApi, input: &mut Input) -> anyhow::Result<()> {
    let mut roster = BookingRoster::new();
    refresh(api, &mut roster, None).await;

    println!("commands: list [status] | refresh | approve <id> | reject <id> | cancel <id> | quit");
    while let Some(line) = input.next_line().await? {
        let line = line.trim();
        let (command, arg) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };
        match command {
            "" => {}
            "quit" | "exit" => break,
            "list" => {
                let filter = match arg {
                    "" => None,
                    value => match BookingStatus::parse(value) {
                        Some(status) => Some(status),
                        None => {
                            println!("unknown status: {value}");
                            continue;
                        }
                    },
                };
                refresh(api, &mut roster, filter).await;
            }
            "refresh" => refresh(api, &mut roster, None).await,
            "approve" => approve_dialog(api, &mut roster, arg, input).await?,
            "reject" => reason_dialog(api, &mut roster, arg, ReasonAction::Reject, input).await?,
            "cancel" => reason_dialog(api, &mut roster, arg, ReasonAction::Cancel, input).await?,
            other => println!("unknown command: {other}"),
        }
    }
    Ok(())
}

/// Full-list refresh; whatever response lands last wins.
async fn refresh(api: &dyn BookingApi, roster: &mut BookingRoster, filter: Option<BookingStatus>) {
    match api.list_bookings(filter).await {
        Ok(bookings) => {
            roster.replace_all(bookings);
            if roster.is_empty() {
                println!("no bookings");
            }
            for booking in roster.bookings() {
                println!("{}", console::booking_line(booking));
            }
        }
        Err(err) => println!("{}", console::failure_report(&err)),
    }
}

/// Approve flow: availability query keyed to the booking's dates, then
/// select -> confirm -> submit.
async fn approve_dialog(
    api: &dyn BookingApi,
    roster: &mut BookingRoster,
    booking_id: &str,
    input: &mut Input,
) -> anyhow::Result<()> {
    let Some(booking) = roster.get(booking_id) else {
        println!("unknown booking: {booking_id}");
        return Ok(());
    };
    if !booking
        .status
        .classify()
        .actions
        .contains(&BookingAction::Approve)
    {
        println!(
            "booking {booking_id} is {} and cannot be approved",
            booking.status.as_str()
        );
        return Ok(());
    }

    let mut workflow = ActionWorkflow::open_approve(booking);
    if let ActionWorkflow::LoadingCampsites {
        start_date,
        end_date,
        ..
    } = &workflow
    {
        match api.available_campsites(*start_date, *end_date).await {
            Ok(candidates) => workflow.candidates_loaded(candidates),
            Err(err) => workflow.load_failed(console::failure_report(&err)),
        }
    }

    if workflow.no_availability() {
        println!("no campsites available for this date range");
    }
    if let ActionWorkflow::SelectingCampsite {
        candidates, error, ..
    } = &workflow
    {
        if let Some(message) = error {
            println!("{message}");
        }
        for candidate in candidates {
            println!("  {}", console::candidate_line(candidate));
        }
    }

    loop {
        println!("approve {booking_id}> select <campsiteId> | notes <text> | submit | close");
        let Some(line) = input.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, arg) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };
        match command {
            "select" => {
                if !workflow.select_campsite(arg) {
                    println!("not in the candidate list: {arg}");
                }
            }
            "notes" => workflow.set_notes(arg),
            "submit" => match workflow.begin_submit() {
                None => println!("select a campsite first"),
                Some(SubmitRequest::Approve {
                    booking_id,
                    campsite_id,
                    notes,
                }) => match api.approve(&booking_id, &campsite_id, notes.as_deref()).await {
                    Ok(updated) => {
                        roster.patch(updated);
                        workflow.submit_succeeded();
                        println!("approved {booking_id} on {campsite_id}");
                        return Ok(());
                    }
                    Err(err) => {
                        println!("{}", console::failure_report(&err));
                        workflow.submit_failed(err.to_string());
                    }
                },
                Some(_) => {}
            },
            "close" => {
                workflow.close();
                return Ok(());
            }
            other => println!("unknown input: {other}"),
        }
    }
    Ok(())
}

/// Reject/cancel flow: the reason is a mandatory audit trail; submission
/// stays blocked until one is entered.
async fn reason_dialog(
    api: &dyn BookingApi,
    roster: &mut BookingRoster,
    booking_id: &str,
    action: ReasonAction,
    input: &mut Input,
) -> anyhow::Result<()> {
    let required = match action {
        ReasonAction::Reject => BookingAction::Reject,
        ReasonAction::Cancel => BookingAction::Cancel,
    };
    let Some(booking) = roster.get(booking_id) else {
        println!("unknown booking: {booking_id}");
        return Ok(());
    };
    if !booking.status.classify().actions.contains(&required) {
        println!(
            "booking {booking_id} is {} and cannot be {}ed",
            booking.status.as_str(),
            action.as_str().trim_end_matches('e')
        );
        return Ok(());
    }

    let mut workflow = ActionWorkflow::open_reason(booking_id, action);
    loop {
        println!("{} {booking_id}> reason <text> | submit | close", action.as_str());
        let Some(line) = input.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, arg) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };
        match command {
            "reason" => workflow.set_reason(arg),
            "submit" => {
                let Some(request) = workflow.begin_submit() else {
                    println!("a reason is required");
                    continue;
                };
                let result = match &request {
                    SubmitRequest::Reject { booking_id, reason } => {
                        api.reject(booking_id, reason).await
                    }
                    SubmitRequest::Cancel { booking_id, reason } => {
                        api.cancel(booking_id, reason).await
                    }
                    SubmitRequest::Approve { .. } => continue,
                };
                match result {
                    Ok(Some(updated)) => {
                        roster.patch(updated);
                    }
                    Ok(None) => {
                        // Backend did not echo the booking; patch locally.
                        let status = match action {
                            ReasonAction::Reject => BookingStatus::Rejected,
                            ReasonAction::Cancel => BookingStatus::Cancelled,
                        };
                        roster.patch_status(request.booking_id(), status);
                    }
                    Err(err) => {
                        println!("{}", console::failure_report(&err));
                        workflow.submit_failed(err.to_string());
                        continue;
                    }
                }
                workflow.submit_succeeded();
                println!("{} recorded for {}", action.as_str(), request.booking_id());
                return Ok(());
            }
            "close" => {
                workflow.close();
                return Ok(());
            }
            other => println!("unknown input: {other}"),
        }
    }
    Ok(())
}
