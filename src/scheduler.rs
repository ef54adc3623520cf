use crate::{
    display::Framebuffer,
    error::Result,
    keypad::KeyEvent,
    machine::Interpreter,
    timer::Timers,
};
use log::trace;
use std::time::{Duration, Instant};

/// Everything outside the machine that the scheduler talks to.
pub trait Host {
    /// Next pending key edge, if any.
    fn poll_key(&mut self) -> Option<KeyEvent>;

    /// Called with the display whenever it changed since the last call.
    fn present(&mut self, framebuffer: &Framebuffer) -> Result<()>;

    /// Called when the tone should start (`true`) or stop (`false`).
    fn set_tone(&mut self, on: bool);
}

/// Paces instruction cycles and timer ticks against wall-clock time.
///
/// Elapsed time is collected in two accumulators: one drained in fixed
/// cycle-sized steps, one in 1/60 s steps for the timers, so the timer rate
/// does not depend on the cycle rate.
#[derive(Debug)]
pub struct Scheduler {
    cycle_period: Duration,
    timer_period: Duration,
    cycles: Duration,
    timers: Duration,
    last: Option<Instant>,
    tone: bool,
}

impl Scheduler {
    pub const DEFAULT_HZ: u32 = 700;

    pub fn new(hz: u32) -> Self {
        Self {
            cycle_period: Duration::from_secs(1) / hz.max(1),
            timer_period: Duration::from_secs(1) / Timers::HZ,
            cycles: Duration::ZERO,
            timers: Duration::ZERO,
            last: None,
            tone: false,
        }
    }

    /// Advances by the time elapsed since the previous call. The first call
    /// only records `now`.
    pub fn update<H: Host>(
        &mut self,
        interpreter: &mut Interpreter,
        host: &mut H,
        now: Instant,
    ) -> Result<usize> {
        let elapsed = self.last.map_or(Duration::ZERO, |last| now - last);
        self.last = Some(now);
        self.advance(interpreter, host, elapsed)
    }

    /// Runs every cycle and timer tick that fits into `elapsed` plus the
    /// carried-over remainder, then presents the display if it changed.
    /// Returns the number of cycles run.
    pub fn advance<H: Host>(
        &mut self,
        interpreter: &mut Interpreter,
        host: &mut H,
        elapsed: Duration,
    ) -> Result<usize> {
        self.cycles += elapsed;
        self.timers += elapsed;

        let mut ran = 0;
        while self.cycles >= self.cycle_period {
            while let Some(KeyEvent { key, pressed }) = host.poll_key() {
                interpreter.set_key(key, pressed);
            }
            interpreter.step()?;
            self.cycles -= self.cycle_period;
            ran += 1;
        }

        while self.timers >= self.timer_period {
            interpreter.tick_timers();
            self.timers -= self.timer_period;
        }

        let sounding = interpreter.timers().is_sounding();
        if sounding != self.tone {
            self.tone = sounding;
            host.set_tone(sounding);
        }

        if interpreter.take_redraw() {
            host.present(interpreter.framebuffer())?;
        }

        trace!("Ran {ran} cycles");
        Ok(ran)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HZ)
    }
}
