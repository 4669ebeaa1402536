use rand::rngs::StdRng;
use tracing::{debug, info};
use crate::constants::*;
use crate::slideshow::crash::CrashLog;
use crate::slideshow::order::ShuffleOrder;
use crate::slideshow::placement::{Rect, Size, find_position};
use crate::state::{Cue, Phase, Variant};

/// An on-screen instance of a deck item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedItem {
    pub id: usize,
    pub rect: Rect,
    pub age: u32,
}

/// What the host needs to draw a frame.
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub items: &'a [PlacedItem],
    pub crash: Option<&'a CrashLog>,
    pub screen_index: usize,
}

/// Drives the popup / crash / blue screen cycle, one frame at a time.
///
/// Knows nothing about textures: the deck is only a list of item sizes and
/// ids are indices into it.
pub struct Controller {
    variant: Variant,
    bounds: Size,
    deck: Vec<Size>,
    screen_count: usize,
    rng: StdRng,

    phase: Phase,
    active_items: Vec<PlacedItem>,
    order: ShuffleOrder,
    spawn_timer: u32,
    phase_timer: u32,

    screen_index: usize,
    dwell_timer: u32,
    crash: Option<CrashLog>,

    cues: Vec<Cue>,
}

impl Controller {
    pub fn new(deck: Vec<Size>, screen_count: usize, bounds: Size, variant: Variant, mut rng: StdRng) -> Self {
        // Oversized items would break the containment guarantee of the placement search
        let deck: Vec<Size> = deck.into_iter().map(|size| size.capped_to(bounds)).collect();
        let order = ShuffleOrder::new(deck.len(), &mut rng);
        info!(deck = order.len(), screens = screen_count, ?variant, "slideshow ready");
        debug!(order = ?order.as_slice(), "fixed shuffle order");

        Self {
            variant,
            bounds,
            deck,
            screen_count,
            rng,
            phase: Phase::Popup,
            active_items: Vec::with_capacity(CAPACITY),
            order,
            spawn_timer: 0,
            phase_timer: 0,
            screen_index: 0,
            dwell_timer: 0,
            crash: None,
            cues: Vec::new(),
        }
    }

    pub fn advance_frame(&mut self) {
        self.phase_timer += 1;

        match self.phase {
            Phase::Popup => self.advance_popup(),
            Phase::Crash => self.advance_crash(),
            Phase::BlueScreen => self.advance_blue_screen(),
        }
    }

    fn advance_popup(&mut self) {
        if self.order.is_empty() {
            return;
        }

        let drained = self.active_items.is_empty() && self.order.is_exhausted();
        if drained || self.phase_timer > POPUP_TIMEOUT {
            self.end_popup_phase();
            return;
        }

        self.spawn_timer += 1;
        if self.spawn_timer >= SPAWN_INTERVAL {
            self.spawn_timer = 0;
            // One traversal of the order per popup phase, reset() starts the next one
            if self.active_items.len() < CAPACITY && !self.order.is_exhausted() {
                self.spawn();
            }
        }

        for item in self.active_items.iter_mut() {
            item.age += 1;
        }
        self.active_items.retain(|item| item.age <= DISPLAY_DURATION);
    }

    fn spawn(&mut self) {
        let Some(id) = self.order.pop() else {
            return;
        };
        let size = self.deck[id];
        let occupied: Vec<Rect> = self.active_items.iter().map(|item| item.rect).collect();
        let (x, y) = find_position(&mut self.rng, size, self.bounds, &occupied);

        let rect = Rect::new(x, y, size);
        debug_assert!(rect.is_inside(self.bounds));

        debug!(id, x, y, width = size.width, height = size.height, "popup");
        self.active_items.push(PlacedItem { id, rect, age: 0 });
        self.cues.push(Cue::Popup);
    }

    fn end_popup_phase(&mut self) {
        match self.variant {
            Variant::Direct => self.enter_blue_screen(self.last_screen()),
            Variant::Crash => {
                info!("entering crash phase");
                self.active_items.clear();
                self.phase = Phase::Crash;
                self.phase_timer = 0;
                self.crash = Some(CrashLog::generate(&mut self.rng));
                self.cues.push(Cue::Crash);
            }
        }
    }

    fn advance_crash(&mut self) {
        let over = match self.crash.as_mut() {
            Some(log) => {
                if log.tick() {
                    self.cues.push(Cue::ErrorLine);
                }
                log.is_over()
            }
            None => true,
        };

        if over {
            self.enter_blue_screen(0);
        }
    }

    fn enter_blue_screen(&mut self, screen_index: usize) {
        info!(screen_index, "entering blue screen phase");
        self.active_items.clear();
        self.crash = None;
        self.phase = Phase::BlueScreen;
        self.phase_timer = 0;
        self.screen_index = screen_index;
        self.dwell_timer = 0;
        self.cues.push(Cue::BlueScreen);
    }

    fn advance_blue_screen(&mut self) {
        self.dwell_timer += 1;
        if self.dwell_timer < SCREEN_DWELL {
            return;
        }

        self.dwell_timer = 0;
        self.screen_index = (self.screen_index + 1) % self.screen_slots();
        if self.screen_index == 0 {
            self.restart();
        }
    }

    // A missing set of images still gets one drawn fallback screen
    fn screen_slots(&self) -> usize {
        self.screen_count.max(1)
    }

    fn last_screen(&self) -> usize {
        self.screen_slots() - 1
    }

    fn restart(&mut self) {
        info!("restarting popup phase");
        self.reset();
        self.cues.push(Cue::Restart);
    }

    /// Forces the move towards the terminal screens, or starts over from them.
    pub fn skip_phase(&mut self) {
        match self.phase {
            Phase::Popup => self.enter_blue_screen(self.last_screen()),
            Phase::Crash => self.enter_blue_screen(0),
            Phase::BlueScreen => self.restart(),
        }
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Popup;
        self.active_items.clear();
        self.order.rewind();
        self.spawn_timer = 0;
        self.phase_timer = 0;
        self.screen_index = 0;
        self.dwell_timer = 0;
        self.crash = None;
    }

    pub fn drain_cues(&mut self) -> impl Iterator<Item = Cue> + '_ {
        self.cues.drain(..)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            items: &self.active_items,
            crash: self.crash.as_ref(),
            screen_index: self.screen_index,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_items(&self) -> &[PlacedItem] {
        &self.active_items
    }

    pub fn cursor(&self) -> usize {
        self.order.cursor()
    }

    pub fn shuffle_order(&self) -> &[usize] {
        self.order.as_slice()
    }
}
