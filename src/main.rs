// ============================================================================
// LazyBudget - Dashboard financier
// ============================================================================
// Programme TUI qui affiche le résumé du mois, les dépenses par catégorie
// et l'évolution sur six mois
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle infinie qui gère événements et rendering
// 3. Runtime tokio en arrière-plan : les compteurs tournent pendant la boucle
// 4. RAII : le guard du runtime et le scheduler s'arrêtent au Drop
// ============================================================================

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazybudget::app::App;
use lazybudget::config::DashboardConfig;
use lazybudget::models::{load_snapshot, DashboardSnapshot};
use lazybudget::refresh::RefreshScheduler;
use lazybudget::ui::events::{is_quit_event, is_refresh_event};
use lazybudget::ui::{render, Event, EventHandler};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place
// - Rotation quotidienne automatique des logs
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans ./logs/lazybudget.log.AAAA-MM-JJ
///
/// # Utilisation
/// ```bash
/// tail -f logs/lazybudget.log.*
/// RUST_LOG=lazybudget=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = PathBuf::from("./logs");

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "lazybudget.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true) // Les compteurs tournent sur les workers tokio
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazybudget=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================
// CONCEPT RUST : Async dans sync
// - main() est synchrone (pour TUI)
// - runtime.enter() permet à tokio::spawn de fonctionner depuis la boucle
// - Les workers du runtime font avancer les compteurs en parallèle
// ============================================================================

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("LazyBudget starting up");

    let config = DashboardConfig::load()?;

    // Snapshot JSON en argument, sinon données de démonstration
    let snapshot = match std::env::args().nth(1) {
        Some(path) => load_snapshot(&PathBuf::from(path))?,
        None => {
            info!("No snapshot given, using demo data");
            DashboardSnapshot::demo(Local::now().date_naive())
        }
    };

    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;
    let _guard = runtime.enter();

    let mut app = App::new(config, snapshot)?;

    // Gardé en vie jusqu'à la fin de main() : Drop arrête la tâche
    let _scheduler = app.config.auto_refresh_period().map(RefreshScheduler::spawn);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    // Les animations démarrent une fois la page affichable
    app.start_animations();

    let events = EventHandler::new(app.config.tick_rate());

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events);

    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event loop
// ============================================================================

/// Boucle principale : render, input, tick
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        // 1. RENDER
        terminal.draw(|frame| render(frame, app))?;

        // 2. INPUT
        let event = events.next()?;
        handle_event(app, &event);

        // 3. TICK
        app.tick();
    }

    Ok(())
}

/// Applique un événement à l'état
///
/// CONCEPT : Two-step quit
/// - 'q' une première fois : demande de confirmation
/// - 'q' une seconde fois : quitte
/// - toute autre touche : annule la demande
fn handle_event(app: &mut App, event: &Event) {
    if matches!(event, Event::Tick) {
        return;
    }

    if app.is_awaiting_quit_confirmation() {
        if is_quit_event(event) {
            info!("Quit confirmed");
            app.quit();
        } else {
            debug!("Quit cancelled");
            app.cancel_quit();
        }
        return;
    }

    if is_quit_event(event) {
        app.request_quit();
    } else if is_refresh_event(event) {
        app.refresh();
    }
}

// ============================================================================
// Terminal
// ============================================================================

/// Configure le terminal en mode TUI
///
/// CONCEPT : Raw mode + alternate screen
/// - Pas d'écho ni de buffering ligne par ligne
/// - L'écran précédent est restauré en sortie
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
///
/// Appelé dans main() même en cas d'erreur.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}
