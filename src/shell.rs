use crate::api::ApiClient;
use crate::routes::Route;
use crate::session::Session;
use crate::tasks::TaskScope;
use crate::views::{Command, Msg, Notice, Page, Transition};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// One browser's navigation shell
///
/// Exactly one page is active at a time. Requests run as tasks in the
/// page's [`TaskScope`]; their results come back tagged with the mount
/// generation that issued them, so a result for a page that has since been
/// torn down is dropped instead of applied.
#[derive(Debug)]
pub struct Shell {
    api: ApiClient,
    session: Session,
    route: Route,
    page: Option<Page>,
    generation: u64,
    scope: TaskScope,
    inflight: usize,
    tx: mpsc::UnboundedSender<(u64, Msg)>,
    rx: mpsc::UnboundedReceiver<(u64, Msg)>,
    notice: Option<Notice>,
    // mounted by a transition and not shown yet
    unseen: Option<Route>,
}

impl Shell {
    pub fn new(api: ApiClient, session: Session) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            session,
            route: Route::Home,
            page: None,
            generation: 0,
            scope: TaskScope::new(),
            inflight: 0,
            tx,
            rx,
            notice: None,
            unseen: None,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// Whether `route`'s page is the active one
    pub fn is_on(&self, route: Route) -> bool {
        self.page.is_some() && self.route.canonical() == route.canonical()
    }

    /// Notice to show once, cleared by taking it
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Tear down the current page and mount `route`, waiting for its
    /// initial requests to report back
    pub async fn navigate(&mut self, route: Route) {
        self.mount(route);
        self.settle().await;
    }

    /// Bring `route` on screen, reusing a mount a transition has just made
    pub async fn visit(&mut self, route: Route) {
        if self.unseen.take() == Some(route) && self.page.is_some() {
            debug!("Showing {} mounted by a transition", route);
            return;
        }
        self.navigate(route).await;
    }

    /// Hand a user action to the active page and carry out what follows.
    /// Returns the route navigated to, if the action led away from the page.
    pub async fn dispatch(&mut self, msg: Msg) -> Option<Route> {
        let Some(page) = self.page.as_mut() else {
            warn!("Dropping {:?}, no page mounted", msg);
            return None;
        };
        debug!("Dispatching {:?} to {}", msg, self.route);
        let transition = page.update(msg);
        let before = self.generation;
        if let Some(route) = self.absorb(transition) {
            self.mount(route);
        }
        self.settle().await;

        if self.generation != before {
            self.unseen = Some(self.route);
            Some(self.route)
        } else {
            None
        }
    }

    fn mount(&mut self, route: Route) {
        let cancelled = self.scope.cancel();
        if cancelled > 0 {
            debug!("Cancelled {} requests of {}", cancelled, self.route);
        }
        self.generation += 1;
        self.inflight = 0;
        self.unseen = None;

        info!("Navigating to {}", route);
        let (page, commands) = route.init(&self.session);
        self.route = route;
        self.page = Some(page);
        self.spawn(commands);
    }

    fn spawn(&mut self, commands: Vec<Command>) {
        for command in commands {
            let api = self.api.clone();
            let tx = self.tx.clone();
            let generation = self.generation;
            self.inflight += 1;
            self.scope.spawn(async move {
                let msg = command.run(&api).await;
                // the shell owns the receiver, so this only fails on teardown
                let _ = tx.send((generation, msg));
            });
        }
    }

    /// Queue the transition's requests and notice, returning its navigation
    fn absorb(&mut self, transition: Transition) -> Option<Route> {
        self.spawn(transition.commands);
        if transition.notice.is_some() {
            self.notice = transition.notice;
        }
        transition.navigate
    }

    /// Apply results until no request of the current mount is outstanding
    async fn settle(&mut self) {
        while self.inflight > 0 {
            let Some((generation, msg)) = self.rx.recv().await else {
                break;
            };
            if generation != self.generation {
                debug!(
                    "Discarding result of mount {} (now {}): {:?}",
                    generation, self.generation, msg
                );
                continue;
            }
            self.inflight -= 1;

            let Some(page) = self.page.as_mut() else {
                continue;
            };
            let transition = page.update(msg);
            if let Some(route) = self.absorb(transition) {
                self.mount(route);
            }
        }
    }
}
