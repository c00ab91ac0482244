//! Shared test infrastructure for led-die integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use embedded_hal::delay::DelayNs;
use led_die::{Button, DieConfig, SegmentDisplay, TickCounters, TickRate, WakeControl};

// ============================================================================
// Simulated board
// ============================================================================

/// A display write and the virtual time it happened at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    pub at_ms: u64,
    pub pattern: u8,
}

/// Wake-interrupt operations, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeOp {
    ClearFlag,
    Arm,
    Disarm,
    Halt,
    /// Wake ISR ran at this time.
    Wake { at_ms: u64 },
}

/// Virtual board: a microsecond clock, a scripted button and a tick
/// interrupt that fires while time advances (but not while halted).
pub struct Sim<'c> {
    pub counters: &'c TickCounters,
    rate: TickRate,
    now_us: Cell<u64>,
    presses: RefCell<Vec<(u64, u64)>>,
    writes: RefCell<Vec<Write>>,
    wake_ops: RefCell<Vec<WakeOp>>,
    armed: Cell<bool>,
    pending: Cell<bool>,
}

impl<'c> Sim<'c> {
    pub fn new(counters: &'c TickCounters, rate: TickRate) -> Self {
        Self {
            counters,
            rate,
            now_us: Cell::new(0),
            presses: RefCell::new(Vec::new()),
            writes: RefCell::new(Vec::new()),
            wake_ops: RefCell::new(Vec::new()),
            armed: Cell::new(false),
            pending: Cell::new(false),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_us.get() / 1000
    }

    /// Holds the button down during `[down_ms, up_ms)`.
    pub fn press(&self, down_ms: u64, up_ms: u64) {
        self.presses.borrow_mut().push((down_ms, up_ms));
    }

    pub fn is_pressed(&self) -> bool {
        let now = self.now_ms();
        self.presses
            .borrow()
            .iter()
            .any(|&(down, up)| now >= down && now < up)
    }

    /// Latches a wake flag, as if an edge happened while the source was idle.
    pub fn raise_stale_wake_flag(&self) {
        self.pending.set(true);
    }

    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.borrow().clone()
    }

    pub fn writes_since(&self, from_ms: u64) -> Vec<Write> {
        self.writes
            .borrow()
            .iter()
            .copied()
            .filter(|w| w.at_ms >= from_ms)
            .collect()
    }

    pub fn last_pattern(&self) -> Option<u8> {
        self.writes.borrow().last().map(|w| w.pattern)
    }

    pub fn wake_ops(&self) -> Vec<WakeOp> {
        self.wake_ops.borrow().clone()
    }

    pub fn halts(&self) -> usize {
        self.wake_ops
            .borrow()
            .iter()
            .filter(|op| **op == WakeOp::Halt)
            .count()
    }

    /// Advances time, firing the tick interrupt at every tick boundary.
    pub fn advance_us(&self, us: u64) {
        let before = self.ticks_at(self.now_us.get());
        self.now_us.set(self.now_us.get() + us);
        let after = self.ticks_at(self.now_us.get());
        for _ in before..after {
            self.counters.on_tick();
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }

    fn ticks_at(&self, us: u64) -> u64 {
        us * self.rate.millihertz() as u64 / 1_000_000_000
    }

    /// Number of ticks fired so far.
    pub fn ticks(&self) -> u64 {
        self.ticks_at(self.now_us.get())
    }

    fn record(&self, op: WakeOp) {
        self.wake_ops.borrow_mut().push(op);
    }

    fn halt(&self) {
        self.record(WakeOp::Halt);
        assert!(self.armed.get(), "halted without an armed wake source");

        if !self.pending.get() {
            // Sleep until the next falling edge. The tick timer is stopped.
            let now = self.now_ms();
            let next = self
                .presses
                .borrow()
                .iter()
                .map(|&(down, _)| down)
                .filter(|&down| down > now)
                .min()
                .expect("halted with no wake edge scheduled");
            self.now_us.set(next * 1000);
            self.pending.set(true);
        }

        // Wake ISR: clear own flag, reset the sleep counter.
        self.pending.set(false);
        self.counters.on_wake();
        self.record(WakeOp::Wake {
            at_ms: self.now_ms(),
        });
    }
}

// ============================================================================
// Peripheral handles
// ============================================================================

pub struct SimDisplay<'s, 'c>(pub &'s Sim<'c>);
pub struct SimButton<'s, 'c>(pub &'s Sim<'c>);
pub struct SimWake<'s, 'c>(pub &'s Sim<'c>);
pub struct SimDelay<'s, 'c>(pub &'s Sim<'c>);

impl SegmentDisplay for SimDisplay<'_, '_> {
    fn show(&mut self, pattern: u8) {
        self.0.writes.borrow_mut().push(Write {
            at_ms: self.0.now_ms(),
            pattern,
        });
    }
}

impl Button for SimButton<'_, '_> {
    fn is_pressed(&mut self) -> bool {
        self.0.is_pressed()
    }
}

impl WakeControl for SimWake<'_, '_> {
    fn clear_pending_wake_flag(&mut self) {
        self.0.record(WakeOp::ClearFlag);
        self.0.pending.set(false);
    }

    fn arm_wake_interrupt(&mut self) {
        self.0.record(WakeOp::Arm);
        self.0.armed.set(true);
    }

    fn disarm_wake_interrupt(&mut self) {
        self.0.record(WakeOp::Disarm);
        self.0.armed.set(false);
    }

    fn halt(&mut self) {
        self.0.halt();
    }
}

impl DelayNs for SimDelay<'_, '_> {
    fn delay_ns(&mut self, ns: u32) {
        self.0.advance_us(u64::from(ns).div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.advance_us(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.advance_ms(u64::from(ms));
    }
}

pub type SimDie<'s, 'c> =
    led_die::Die<'c, SimDisplay<'s, 'c>, SimButton<'s, 'c>, SimWake<'s, 'c>, SimDelay<'s, 'c>>;

/// Builds a die wired to `sim`.
pub fn die<'s, 'c>(sim: &'s Sim<'c>, config: DieConfig) -> SimDie<'s, 'c> {
    led_die::Die::new(
        config,
        sim.counters,
        SimDisplay(sim),
        SimButton(sim),
        SimWake(sim),
        SimDelay(sim),
    )
}

/// 20 Hz tick (50 ms period), 10 s auto-sleep = 200 ticks.
pub fn test_config() -> DieConfig {
    DieConfig::builder()
        .tick_rate(TickRate::from_hz(20))
        .sleep_timeout_secs(10)
        .build()
        .unwrap()
}

/// Polls `die` once per virtual millisecond until `f` accepts an event.
pub fn poll_until<F>(sim: &Sim<'_>, die: &mut SimDie<'_, '_>, limit_ms: u64, mut f: F) -> led_die::LoopEvent
where
    F: FnMut(&led_die::LoopEvent) -> bool,
{
    let deadline = sim.now_ms() + limit_ms;
    while sim.now_ms() < deadline {
        let event = die.poll();
        if f(&event) {
            return event;
        }
        sim.advance_ms(1);
    }
    panic!("no matching event within {} ms", limit_ms);
}
