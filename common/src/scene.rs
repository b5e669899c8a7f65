use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::apple::Apple;
use crate::drawer::{Align, Canvas, Drawer};
use crate::event::InputEvent;
use crate::game_state::GameState;
use crate::object::GameObject;
use crate::score::Score;
use crate::screen::GameScreen;
use crate::screens::{DeadScreen, MenuScreen};
use crate::shared::Shared;
use crate::snake::{Direction, Snake};

pub type ObjectList = Vec<Box<dyn GameObject>>;

/// The ordered objects active in each game state.
#[derive(Default)]
pub struct Paints {
    pub menu: ObjectList,
    pub running: ObjectList,
    pub dead: ObjectList,
}

impl Paints {
    pub fn active(&self, state: GameState) -> &[Box<dyn GameObject>] {
        match state {
            GameState::Menu => &self.menu,
            GameState::Running => &self.running,
            GameState::Dead => &self.dead,
        }
    }

    pub fn active_mut(&mut self, state: GameState) -> &mut [Box<dyn GameObject>] {
        match state {
            GameState::Menu => &mut self.menu,
            GameState::Running => &mut self.running,
            GameState::Dead => &mut self.dead,
        }
    }
}

/// Builds the object sets for a new game.
pub trait ObjectFactory: Send {
    fn build(&mut self, screen: GameScreen) -> Paints;
}

impl<T> ObjectFactory for T
where
    T: FnMut(GameScreen) -> Paints + Send,
{
    fn build(&mut self, screen: GameScreen) -> Paints {
        self(screen)
    }
}

/// Handles to the objects of the game most recently built.
#[derive(Debug, Clone)]
pub struct Session {
    pub snake: Shared<Snake>,
    pub apple: Shared<Apple>,
    pub score: Shared<Score>,
}

/// The regular game: menu, snake with apple and score, and the game-over screen.
pub struct StandardObjects {
    rng: StdRng,
    score_align: Align,
    session: Option<Session>,
}

impl StandardObjects {
    /// With a seed the sequence of apple positions is reproducible.
    pub fn new(seed: Option<u64>, score_align: Align) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, score_align, session: None }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

impl Default for StandardObjects {
    fn default() -> Self {
        Self::new(None, Align::Right)
    }
}

impl ObjectFactory for StandardObjects {
    fn build(&mut self, screen: GameScreen) -> Paints {
        let grid = screen.grid();
        let body = Snake::initial_body(grid);

        let score = Shared::new(Score::new(self.score_align));
        let apple_rng = StdRng::seed_from_u64(self.rng.gen());
        let apple = Shared::new(Apple::new(grid, apple_rng, &body));
        let snake = Shared::new(Snake::with_body(
            body,
            Direction::Right,
            grid,
            apple.clone(),
            score.clone(),
        ));

        self.session = Some(Session {
            snake: snake.clone(),
            apple: apple.clone(),
            score: score.clone(),
        });

        Paints {
            menu: vec![Box::new(MenuScreen::new(screen))],
            running: vec![Box::new(snake), Box::new(apple), Box::new(score.clone())],
            dead: vec![Box::new(DeadScreen::new(screen, score))],
        }
    }
}

/// What the scene loop tells the process driver.
#[derive(Debug)]
pub enum SceneSignal {
    /// Quit or Escape was received; the loop has stopped.
    Terminate,
    /// A frame could not be presented. The loop keeps going.
    Fatal(anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Owns the game state and the objects of every state, and drives ticks and events.
pub struct Scene<D: Drawer, F: ObjectFactory = StandardObjects> {
    drawer: D,
    screen: GameScreen,
    state: GameState,
    paints: Paints,
    factory: F,
    games_started: u32,
}

impl<D: Drawer> Scene<D> {
    pub fn new(drawer: D) -> Self {
        Self::with_factory(drawer, StandardObjects::default())
    }
}

impl<D: Drawer, F: ObjectFactory> Scene<D, F> {
    pub fn with_factory(drawer: D, mut factory: F) -> Self {
        let screen = GameScreen::from_drawer(&drawer);
        let paints = factory.build(screen);
        info!(width = screen.width, height = screen.height, "scene created");

        Scene {
            drawer,
            screen,
            state: GameState::Menu,
            paints,
            factory,
            games_started: 0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn screen(&self) -> GameScreen {
        self.screen
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn drawer(&self) -> &D {
        &self.drawer
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    /// Hand the event to every active object, then check whether it asks to quit.
    pub fn handle_event(&mut self, event: &InputEvent) -> Control {
        for object in self.paints.active_mut(self.state) {
            object.handle_event(event);
        }

        if event.is_exit() {
            Control::Exit
        } else {
            Control::Continue
        }
    }

    /// Update the active objects in order. The first one reporting another
    /// state wins and the rest are skipped for this tick.
    pub fn update(&mut self) -> GameState {
        let current = self.state;
        let next = self
            .paints
            .active_mut(current)
            .iter_mut()
            .filter_map(|object| object.update())
            .find(|state| *state != current);

        if let Some(next) = next {
            self.transition(next);
        }
        self.state
    }

    pub fn render(&mut self) -> Result<()> {
        let objects = self.paints.active(self.state);
        self.drawer
            .present(&mut |canvas: &mut dyn Canvas| -> Result<()> {
                for object in objects {
                    object.paint(canvas).context("failed to paint")?;
                }
                Ok(())
            })
            .context("failed to present")
    }

    /// One update followed by one render pass.
    pub fn tick(&mut self) -> Result<()> {
        self.update();
        self.render()
    }

    fn transition(&mut self, next: GameState) {
        info!(from = ?self.state, to = ?next, "game state changed");

        if next == GameState::Running && self.state != GameState::Running {
            self.paints = self.factory.build(self.screen);
            self.games_started += 1;
            info!(game = self.games_started, "new game");
        }
        self.state = next;
    }

    /// Spawn the loop task and return the channel it reports on.
    ///
    /// Each iteration handles either one event or one tick. Ticks missed while a
    /// frame is being drawn are skipped, so at most one tick is ever pending.
    pub fn run(
        mut self,
        mut events: mpsc::Receiver<InputEvent>,
        tick_interval: Duration,
    ) -> mpsc::Receiver<SceneSignal>
    where
        D: 'static,
        F: 'static,
    {
        let (signals, signal_rx) = mpsc::channel(1);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    event = events.recv() => {
                        let Some(event) = event else {
                            debug!("event channel closed, stopping scene loop");
                            break;
                        };

                        if self.handle_event(&event) == Control::Exit {
                            info!("exit requested");
                            let _ = signals.send(SceneSignal::Terminate).await;
                            break;
                        }
                    }

                    _ = ticker.tick() => {
                        if let Err(e) = self.tick() {
                            error!(error = %format!("{:#}", e), "frame failed");
                            if signals.send(SceneSignal::Fatal(e)).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        signal_rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawer::{Rgba, TextOpts};
    use crate::event::Key;
    use anyhow::bail;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct NullDrawer {
        presented: usize,
    }

    impl Canvas for NullDrawer {
        fn background(&mut self, _color: Rgba) -> Result<()> {
            Ok(())
        }

        fn colored_rect(&mut self, _x: i32, _y: i32, _w: i32, _h: i32, _color: Rgba) -> Result<()> {
            Ok(())
        }

        fn textured_rect(&mut self, _x: i32, _y: i32, _w: i32, _h: i32, _texture: &str) -> Result<()> {
            Ok(())
        }

        fn text(&mut self, _content: &str, _opts: &TextOpts) -> Result<()> {
            Ok(())
        }
    }

    impl Drawer for NullDrawer {
        fn present(&mut self, render: &mut dyn FnMut(&mut dyn Canvas) -> Result<()>) -> Result<()> {
            render(self)?;
            self.presented += 1;
            Ok(())
        }

        fn screen_width(&self) -> i32 {
            200
        }

        fn screen_height(&self) -> i32 {
            200
        }
    }

    /// Reports a fixed state and counts calls.
    struct Probe {
        reports: Option<GameState>,
        updates: Arc<AtomicUsize>,
        events: Arc<AtomicUsize>,
        fail_paint: bool,
    }

    impl Probe {
        fn new(reports: Option<GameState>) -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let updates = Arc::new(AtomicUsize::new(0));
            let events = Arc::new(AtomicUsize::new(0));
            let probe = Probe {
                reports,
                updates: updates.clone(),
                events: events.clone(),
                fail_paint: false,
            };
            (probe, updates, events)
        }
    }

    impl GameObject for Probe {
        fn paint(&self, _canvas: &mut dyn Canvas) -> Result<()> {
            if self.fail_paint {
                bail!("broken brush");
            }
            Ok(())
        }

        fn update(&mut self) -> Option<GameState> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.reports
        }

        fn handle_event(&mut self, _event: &InputEvent) {
            self.events.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn once(paints: Paints) -> impl FnMut(GameScreen) -> Paints + Send {
        let mut paints = Some(paints);
        move |_| paints.take().unwrap_or_default()
    }

    #[test]
    fn update_short_circuits_on_first_transition() {
        let (first, first_updates, _) = Probe::new(Some(GameState::Dead));
        let (second, second_updates, _) = Probe::new(Some(GameState::Menu));
        let paints = Paints {
            menu: vec![Box::new(first), Box::new(second)],
            ..Paints::default()
        };

        let mut scene = Scene::with_factory(NullDrawer::default(), once(paints));
        assert_eq!(scene.update(), GameState::Dead);
        assert_eq!(first_updates.load(Ordering::SeqCst), 1);
        assert_eq!(second_updates.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn objects_without_update_are_skipped() {
        let (silent, _, _) = Probe::new(None);
        let (same, same_updates, _) = Probe::new(Some(GameState::Menu));
        let paints = Paints {
            menu: vec![Box::new(silent), Box::new(same)],
            ..Paints::default()
        };

        let mut scene = Scene::with_factory(NullDrawer::default(), once(paints));
        assert_eq!(scene.update(), GameState::Menu);
        assert_eq!(same_updates.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn events_reach_only_the_active_set() {
        let (menu, _, menu_events) = Probe::new(Some(GameState::Menu));
        let (dead, _, dead_events) = Probe::new(Some(GameState::Dead));
        let paints = Paints {
            menu: vec![Box::new(menu)],
            dead: vec![Box::new(dead)],
            ..Paints::default()
        };

        let mut scene = Scene::with_factory(NullDrawer::default(), once(paints));
        assert_eq!(scene.handle_event(&InputEvent::pressed(Key::Up)), Control::Continue);
        assert_eq!(menu_events.load(Ordering::SeqCst), 1);
        assert_eq!(dead_events.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn exit_events_are_still_dispatched() {
        let (menu, _, menu_events) = Probe::new(None);
        let paints = Paints {
            menu: vec![Box::new(menu)],
            ..Paints::default()
        };

        let mut scene = Scene::with_factory(NullDrawer::default(), once(paints));
        assert_eq!(scene.handle_event(&InputEvent::pressed(Key::Escape)), Control::Exit);
        assert_eq!(scene.handle_event(&InputEvent::Quit), Control::Exit);
        assert_eq!(scene.handle_event(&InputEvent::released(Key::Escape)), Control::Continue);
        assert_eq!(menu_events.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn paint_failure_aborts_the_frame() {
        let (mut broken, _, _) = Probe::new(None);
        broken.fail_paint = true;
        let paints = Paints {
            menu: vec![Box::new(broken)],
            ..Paints::default()
        };

        let mut scene = Scene::with_factory(NullDrawer::default(), once(paints));
        let err = scene.render().unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("failed to present"), "{}", chain);
        assert!(chain.contains("failed to paint"), "{}", chain);
        assert!(chain.contains("broken brush"), "{}", chain);
        assert_eq!(scene.drawer().presented, 0);
    }

    #[test]
    fn entering_running_rebuilds_objects() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = builds.clone();
        let factory = move |_: GameScreen| {
            counter.fetch_add(1, Ordering::SeqCst);
            let (start, _, _) = Probe::new(Some(GameState::Running));
            let (die, _, _) = Probe::new(Some(GameState::Dead));
            let (restart, _, _) = Probe::new(Some(GameState::Running));
            Paints {
                menu: vec![Box::new(start)],
                running: vec![Box::new(die)],
                dead: vec![Box::new(restart)],
            }
        };

        let mut scene = Scene::with_factory(NullDrawer::default(), factory);
        assert_eq!(builds.load(Ordering::SeqCst), 1);

        assert_eq!(scene.update(), GameState::Running);
        assert_eq!(builds.load(Ordering::SeqCst), 2);
        assert_eq!(scene.update(), GameState::Dead);
        assert_eq!(builds.load(Ordering::SeqCst), 2);
        assert_eq!(scene.update(), GameState::Running);
        assert_eq!(builds.load(Ordering::SeqCst), 3);
        assert_eq!(scene.games_started(), 2);
    }
}
