use std::env;
use std::time::Duration;

use dotenv::dotenv;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::sleep;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_cell::{group_by_specialty_room, BookingEngine};
use directory_cell::DirectoryService;
use schedule_cell::{ScheduleEngine, ScheduleFilter, ScheduleService};
use shared_api::{ApiClient, SessionStore};
use shared_config::AppConfig;
use shared_models::{Notice, NoticeLevel, Notifier};
use shared_utils::today_key;

/// Read-only smoke run against the configured backend: directory page,
/// availability picker, admin schedule page, and the personal booking list
/// when a stored session exists.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareBook console");

    let config = AppConfig::from_env();
    let session = SessionStore::load(&config).await;
    let signed_in = session.is_authenticated().await;
    if signed_in {
        info!("Stored session found, personal probes enabled");
    }
    let api = ApiClient::new(&config, session)?;

    let directory = DirectoryService::new(api.clone());
    let specialties = directory.list_specialties(None, Some(1), Some(10)).await?;
    info!("Directory lists {} specialties", specialties.items().len());
    for specialty in specialties.items() {
        info!("  [{}] {}", specialty.id, specialty.name);
    }

    let specialty_id = env::var("CAREBOOK_SPECIALTY_ID")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(1);
    let date = env::var("CAREBOOK_DATE").unwrap_or_else(|_| today_key());

    let schedule = ScheduleService::new(api.clone());
    let available = schedule.available_slots(specialty_id, &date, None, None).await?;
    let picker = group_by_specialty_room(&available);
    info!(
        "{} slots available on {} across {} room groups",
        available.len(),
        date,
        picker.len()
    );
    for group in &picker {
        info!(
            "  {}: room {} building {} ({} slots)",
            group.specialty_name,
            group.room,
            group.building,
            group.slots.len()
        );
    }

    let (notifier, mut notices) = Notifier::channel();
    let engine = ScheduleEngine::start(&config, api.clone(), notifier);
    engine
        .fetch(ScheduleFilter { date: Some(date.clone()), ..ScheduleFilter::default() })
        .await?;
    for _ in 0..20 {
        sleep(Duration::from_millis(100)).await;
        if !engine.snapshot().await.page.content.is_empty() {
            break;
        }
    }
    let state = engine.snapshot().await;
    info!(
        "Admin page for {} holds {} day groups, {} slots flat",
        date,
        state.page.content.len(),
        state.slots.len()
    );
    drain_notices(&mut notices);

    if signed_in {
        let (booking_notifier, mut booking_notices) = Notifier::channel();
        let bookings = BookingEngine::start(&config, api, booking_notifier);
        match bookings.my_bookings().await {
            Ok(list) => info!("Signed-in user has {} bookings", list.len()),
            Err(err) => warn!("Personal booking probe failed: {}", err.user_message()),
        }
        drain_notices(&mut booking_notices);
    } else {
        info!("No stored session, skipping the personal booking probe");
    }

    info!("Probe complete");
    Ok(())
}

fn drain_notices(notices: &mut UnboundedReceiver<Notice>) {
    while let Ok(notice) = notices.try_recv() {
        match notice.level {
            NoticeLevel::Error => error!("notice: {}", notice.message),
            NoticeLevel::Warning => warn!("notice: {}", notice.message),
            _ => info!("notice: {}", notice.message),
        }
    }
}
