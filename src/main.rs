use flirtly_deck::config::Settings;
use flirtly_deck::core::{RandomOdds, SwipeEngine};
use flirtly_deck::models::{Point, SwipeAction};
use flirtly_deck::services::{
    DemoCandidateSource, JsonLineReporter, TracingNotifier, TracingSurface,
};
use tracing::{error, info};

const DEMO_VIEWPORT_WIDTH: f64 = 390.0;

fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Flirtly deck demo...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    let odds = RandomOdds::new(settings.matching.probability);
    let surface = TracingSurface::new(DEMO_VIEWPORT_WIDTH);
    let notifier = TracingNotifier;
    let reporter = JsonLineReporter::new(std::io::stdout());
    let mut source = DemoCandidateSource::new(settings.deck.demo_profiles);

    let mut engine = SwipeEngine::new(settings, Box::new(odds), surface, notifier, reporter);

    if let Err(e) = engine.start(&mut source) {
        error!("Failed to load candidate deck: {}", e);
        return;
    }

    // Scripted session: a committed drag, a cancelled drag, button actions,
    // a superlike quota rejection and an undo.
    engine.pointer_down(Point::new(200.0, 400.0));
    engine.pointer_move(Point::new(280.0, 410.0));
    engine.pointer_move(Point::new(340.0, 415.0));
    engine.pointer_up(Point::new(340.0, 415.0));
    engine.advance(300);

    engine.pointer_down(Point::new(200.0, 400.0));
    engine.pointer_move(Point::new(150.0, 400.0));
    engine.pointer_up(Point::new(150.0, 400.0));

    engine.press(SwipeAction::Superlike);
    engine.advance(400);
    engine.press(SwipeAction::Superlike);

    engine.press(SwipeAction::Skip);
    engine.advance(400);

    engine.press_undo();
    engine.advance(1000);

    info!(
        deck_state = ?engine.deck_state(),
        index = engine.current_index(),
        likes_remaining = engine.quotas().likes_remaining,
        super_likes_remaining = engine.quotas().super_likes_remaining,
        matches = engine.match_count(),
        history = engine.history_len(),
        "demo session finished"
    );
}
