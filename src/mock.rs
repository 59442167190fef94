//! Recording pins and delay sharing one virtual clock

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::interface::ReleasePin;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Data,
    Clock,
    Mosi,
    Cs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
    Float,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Drive(Line, Level),
    Read(Line),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
    pub at: u64,
    pub event: Event,
}

#[derive(Debug, Default)]
struct Recorder {
    now: u64,
    records: Vec<Record>,
    ack_after: Option<usize>,
    reads: usize,
}

/// Shared handle creating pins and delays on the same timeline
#[derive(Clone, Debug, Default)]
pub struct Harness(Rc<RefCell<Recorder>>);

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, line: Line) -> MockPin {
        MockPin {
            line,
            harness: self.clone(),
        }
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay(self.clone())
    }

    /// Make the data line read low once `reads` high reads have been served
    pub fn ack_after(&self, reads: usize) {
        let mut rec = self.0.borrow_mut();
        rec.ack_after = Some(reads);
        rec.reads = 0;
    }

    pub fn clear(&self) {
        let mut rec = self.0.borrow_mut();
        rec.records.clear();
        rec.reads = 0;
    }

    pub fn now(&self) -> u64 {
        self.0.borrow().now
    }

    pub fn records(&self) -> Vec<Record> {
        self.0.borrow().records.clone()
    }

    pub fn events(&self, line: Line) -> Vec<Event> {
        self.records()
            .into_iter()
            .map(|r| r.event)
            .filter(|e| match e {
                Event::Drive(l, _) | Event::Read(l) => *l == line,
            })
            .collect()
    }

    pub fn reads(&self, line: Line) -> usize {
        self.events(line)
            .iter()
            .filter(|e| matches!(e, Event::Read(_)))
            .count()
    }

    /// Level of `line` and how long it was held, one entry per drive
    pub fn pulses(&self, line: Line) -> Vec<(Level, u64)> {
        let rec = self.0.borrow();
        let drives: Vec<(u64, Level)> = rec
            .records
            .iter()
            .filter_map(|r| match r.event {
                Event::Drive(l, level) if l == line => Some((r.at, level)),
                _ => None,
            })
            .collect();
        drives
            .iter()
            .enumerate()
            .map(|(i, (at, level))| {
                let end = drives.get(i + 1).map_or(rec.now, |next| next.0);
                (*level, end - at)
            })
            .collect()
    }

    fn push(&self, event: Event) {
        let mut rec = self.0.borrow_mut();
        let at = rec.now;
        rec.records.push(Record { at, event });
    }

    fn read_low(&self, line: Line) -> bool {
        self.push(Event::Read(line));
        let mut rec = self.0.borrow_mut();
        rec.reads += 1;
        let reads = rec.reads;
        rec.ack_after.is_some_and(|n| reads > n)
    }
}

#[derive(Debug)]
pub struct MockPin {
    line: Line,
    harness: Harness,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.harness.push(Event::Drive(self.line, Level::Low));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.harness.push(Event::Drive(self.line, Level::High));
        Ok(())
    }
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.harness.read_low(self.line))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.harness.read_low(self.line))
    }
}

impl ReleasePin for MockPin {
    fn release(&mut self) -> Result<(), Self::Error> {
        self.harness.push(Event::Drive(self.line, Level::Float));
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockDelay(Harness);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.0.borrow_mut().now += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.0.borrow_mut().now += u64::from(ms) * 1_000_000;
    }
}

/// Number of reset + detection sequences in a data line waveform
pub fn count_handshakes(pulses: &[(Level, u64)]) -> usize {
    pulses
        .windows(3)
        .filter(|w| {
            w[0].0 == Level::Low
                && w[0].1 >= 4_000_000
                && w[1] == (Level::High, 100_000)
                && w[2].0 == Level::Low
                && w[2].1 == 450_000
        })
        .count()
}
