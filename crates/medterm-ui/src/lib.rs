use std::io::{self, Write};
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use medterm_config::Config;
use medterm_config::ui::UiConfig;
use medterm_types::{AppEvent, UiEvent};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

pub mod events;
pub mod input;
pub mod state;
pub mod view;


use self::input::Command;
use self::state::UiState;
use self::view::{Palette, help_text, render_result};

const BUSY_MESSAGE: &str = "… جارٍ التحليل، يرجى الانتظار";
const NO_RESULT_MESSAGE: &str = "لا توجد نتيجة لعرضها";

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let ui_config = config.read().await.ui.clone();
    let palette = Palette::new(ui_config.color && atty::is(atty::Stream::Stdout));

    let (line_tx, line_rx) = kanal::bounded(16);
    input::spawn_stdin_reader(line_tx)?;

    run_ui(
        app_to_ui_rx,
        ui_to_app_tx,
        line_rx.to_async(),
        &ui_config,
        palette,
        io::stdout(),
        cancel,
    )
    .await
}

/// Drive the UI from input lines and backend events until quit, input end
/// or cancellation. Input end waits for an in-flight analysis to settle.
pub async fn run_ui<W: Write>(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    line_rx: AsyncReceiver<String>,
    ui_config: &UiConfig,
    palette: Palette,
    mut out: W,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut ui = UiState::new(ui_config.show_academic);
    let mut input_closed = false;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("UI loop stopping");
                break;
            }
            event = app_to_ui_rx.recv() => {
                let event = event?;
                if let Some(text) = events::handle_event(event, &mut ui, &palette) {
                    emit(&mut out, &text)?;
                }

                // Input ended while a request was in flight
                if input_closed && ui.accepts_submissions() {
                    close(&ui_to_app_tx).await;
                    break;
                }

                if ui.accepts_submissions() {
                    prompt(&mut out, &ui_config.prompt)?;
                }
            }
            line = line_rx.recv(), if !input_closed => {
                let Ok(line) = line else {
                    tracing::debug!("input closed");
                    input_closed = true;
                    if ui.accepts_submissions() {
                        close(&ui_to_app_tx).await;
                        break;
                    }
                    continue;
                };

                match Command::parse(&line) {
                    Command::Submit(term) => {
                        if ui.accepts_submissions() {
                            ui.mark_submitted();
                            ui_to_app_tx
                                .send(AppEvent::UiEvent(UiEvent::SubmitTerm(term)))
                                .await?;
                        } else {
                            emit(&mut out, BUSY_MESSAGE)?;
                        }
                    }
                    Command::ToggleAcademic => {
                        match ui.toggle_academic() {
                            Some(panel) => emit(&mut out, &render_result(panel, &palette))?,
                            None => emit(&mut out, NO_RESULT_MESSAGE)?,
                        }
                        prompt(&mut out, &ui_config.prompt)?;
                    }
                    Command::Help => {
                        emit(&mut out, help_text())?;
                        prompt(&mut out, &ui_config.prompt)?;
                    }
                    Command::Quit => {
                        close(&ui_to_app_tx).await;
                        break;
                    }
                    Command::Ignore => prompt(&mut out, &ui_config.prompt)?,
                }
            }
        }
    }

    Ok(())
}

async fn close(ui_to_app_tx: &AsyncSender<AppEvent>) {
    if let Err(e) = ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await {
        tracing::warn!("Failed to send close to backend: {}", e);
    }
}

fn emit(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", text)?;
    out.flush()
}

fn prompt(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "{}", text)?;
    out.flush()
}
