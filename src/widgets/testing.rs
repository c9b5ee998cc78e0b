//! Test double that records the capability calls it receives.

use super::{Interactivity, Resizable, Widget};
use eframe::egui;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Record {
    resizes: Vec<egui::Vec2>,
    enabled: Vec<bool>,
    drops: usize,
}

/// Widget whose resize and enable calls can be inspected through a [`Recorded`].
#[derive(Debug, Clone)]
pub struct RecordingWidget {
    record: Rc<RefCell<Record>>,
}

/// Read side of a [`RecordingWidget`].
#[derive(Debug, Clone)]
pub struct Recorded {
    record: Rc<RefCell<Record>>,
}

impl RecordingWidget {
    pub fn new() -> (Self, Recorded) {
        let record = Rc::new(RefCell::new(Record::default()));
        (
            Self {
                record: Rc::clone(&record),
            },
            Recorded { record },
        )
    }

    pub fn boxed(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }
}

impl Drop for RecordingWidget {
    fn drop(&mut self) {
        self.record.borrow_mut().drops += 1;
    }
}

impl Recorded {
    pub fn resizes(&self) -> Vec<egui::Vec2> {
        self.record.borrow().resizes.clone()
    }

    pub fn enabled_calls(&self) -> Vec<bool> {
        self.record.borrow().enabled.clone()
    }

    pub fn last_enabled(&self) -> Option<bool> {
        self.record.borrow().enabled.last().copied()
    }

    pub fn drops(&self) -> usize {
        self.record.borrow().drops
    }
}

impl Widget for RecordingWidget {
    fn kind(&self) -> &str {
        "recording"
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.label("recording");
    }

    fn as_resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }

    fn as_interactivity(&mut self) -> Option<&mut dyn Interactivity> {
        Some(self)
    }
}

impl Resizable for RecordingWidget {
    fn resize(&mut self, size: egui::Vec2) {
        self.record.borrow_mut().resizes.push(size);
    }
}

impl Interactivity for RecordingWidget {
    fn set_enabled(&mut self, enabled: bool) {
        self.record.borrow_mut().enabled.push(enabled);
    }
}
