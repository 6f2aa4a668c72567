//! # Effect Driver
//!
//! Owns the `App` and is the only place `update()` is called. Effects that
//! need I/O or time become tokio tasks; each task posts exactly one `Action`
//! back over an unbounded channel, and the owner of the driver feeds those
//! into `dispatch` from its event loop.
//!
//! ```text
//!   UI command ─► dispatch ─► update ─► effects ─► tokio::spawn ─┐
//!        ▲                                                       │
//!        └──────────── drain / step ◄── mpsc ◄── Action ─────────┘
//! ```

use std::future::Future;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::core::action::{Action, Effect, update};
use crate::core::scanner;
use crate::core::scroll::VerseKey;
use crate::core::state::App;

pub struct Driver {
    app: App,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
    /// Gateway requests whose result action has not come back yet.
    in_flight: usize,
    scroll_request: Option<VerseKey>,
    quit: bool,
}

impl Driver {
    pub fn new(app: App) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            app,
            tx,
            rx,
            in_flight: 0,
            scroll_request: None,
            quit: false,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// The verse the view should scroll to on its next draw, if any.
    pub fn take_scroll_request(&mut self) -> Option<VerseKey> {
        self.scroll_request.take()
    }

    pub fn dispatch(&mut self, action: Action) {
        if action.settles_request() {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        debug!("Dispatch: {:?}", action);
        for effect in update(&mut self.app, action) {
            self.run(effect);
        }
    }

    /// Applies every action already waiting in the channel. Returns whether any arrived.
    pub fn drain(&mut self) -> bool {
        let mut any = false;
        while let Ok(action) = self.rx.try_recv() {
            any = true;
            self.dispatch(action);
        }
        any
    }

    /// Waits for the next background action and applies it.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Steps until no gateway request is outstanding. Timers may still be pending.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            if !self.step().await {
                break;
            }
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::Quit => self.quit = true,
            Effect::ScrollTo(key) => {
                debug!("Scroll scheduled for {}", key);
                self.scroll_request = Some(key);
            }
            Effect::ExpireNotice { generation, after } => {
                self.spawn_timer(after, Action::NoticeExpired(generation));
            }
            Effect::ExpireHighlight { generation, after } => {
                self.spawn_timer(after, Action::HighlightExpired(generation));
            }
            Effect::FetchTranslations => {
                let gateway = self.app.gateway.clone();
                self.spawn_request(async move {
                    Action::TranslationsLoaded(gateway.list_translations().await)
                });
            }
            Effect::FetchBooks {
                request,
                translation,
            } => {
                let gateway = self.app.gateway.clone();
                self.spawn_request(async move {
                    Action::BooksLoaded {
                        request,
                        result: gateway.list_books(&translation).await,
                    }
                });
            }
            Effect::FetchChapterCount {
                request,
                translation,
                book,
                show_picker,
            } => {
                let gateway = self.app.gateway.clone();
                self.spawn_request(async move {
                    let result = gateway.chapter_count(&translation, &book).await;
                    Action::ChapterCountLoaded {
                        request,
                        book,
                        show_picker,
                        result,
                    }
                });
            }
            Effect::FetchVerses {
                request,
                translation,
                book,
                chapter,
            } => {
                let gateway = self.app.gateway.clone();
                self.spawn_request(async move {
                    Action::VersesLoaded {
                        request,
                        result: gateway.get_verses(&translation, &book, chapter).await,
                    }
                });
            }
            Effect::ScanVerses {
                request,
                translation,
                books,
                term,
                depth,
            } => {
                info!("Spawning verse scan for {:?}", term);
                let gateway = self.app.gateway.clone();
                self.spawn_request(async move {
                    let report =
                        scanner::scan(gateway.as_ref(), &translation, &books, &term, depth).await;
                    Action::ScanCompleted { request, report }
                });
            }
        }
    }

    fn spawn_request<F>(&mut self, request: F)
    where
        F: Future<Output = Action> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = request.await;
            if tx.send(action).is_err() {
                warn!("Failed to deliver gateway result: receiver dropped");
            }
        });
    }

    fn spawn_timer(&self, after: Duration, action: Action) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if tx.send(action).is_err() {
                debug!("Timer fired after driver shut down");
            }
        });
    }
}
