use clap::Parser;
use salon_booking::app::report;
use salon_booking::utils::error::ErrorSeverity;
use salon_booking::utils::{logger, validation::Validate};
use salon_booking::{
    BookingDraft, BookingError, BookingService, CliConfig, Command, HttpReservationStore,
    OutputFormat, SystemClock,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            exit_with(&e);
        }
    };
    logger::init_logger(cli.verbose, settings.log_level.as_deref(), settings.log_json);

    tracing::info!("Starting salon-booking");
    tracing::debug!("Effective settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let store = match HttpReservationStore::from_config(&settings) {
        Ok(store) => store,
        Err(e) => exit_with(&e),
    };
    let service = BookingService::new(store, SystemClock);

    if let Err(e) = run(&service, cli.command).await {
        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        exit_with(&e);
    }

    Ok(())
}

async fn run(
    service: &BookingService<HttpReservationStore, SystemClock>,
    command: Command,
) -> salon_booking::Result<()> {
    match command {
        Command::Rooms => {
            println!("{}", report::render_rooms());
        }
        Command::Slots { room, date, start } => {
            let availability = service.availability(date, room, start).await?;
            println!("{}", report::render_availability(&availability, start));
        }
        Command::Reserve {
            client,
            room,
            date,
            start,
            end,
            no_check,
        } => {
            let draft = BookingDraft {
                client,
                date: Some(date),
                room: Some(room),
                start: Some(start),
                end: Some(end),
            };
            let created = if no_check {
                service.submit(&draft).await?
            } else {
                service.book(&draft).await?
            };
            println!("Reservation created:");
            println!("{}", report::render_table(std::slice::from_ref(&created)));
        }
        Command::List { date, room, format } => {
            let mut reservations = service.list(date).await?;
            if let Some(room) = room {
                reservations.retain(|r| r.room == room);
            }
            let rendered = match format {
                OutputFormat::Table => report::render_table(&reservations),
                OutputFormat::Json => report::render_json(&reservations)?,
                OutputFormat::Csv => report::render_csv(&reservations)?,
            };
            println!("{}", rendered);
        }
    }
    Ok(())
}

fn exit_with(e: &BookingError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
