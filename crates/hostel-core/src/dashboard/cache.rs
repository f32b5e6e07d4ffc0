//! Last successfully fetched collection per entity kind.
//!
//! Collections are replaced wholesale by their owning loader and never
//! patched in place; a failed fetch leaves the previous contents alone.

use std::sync::Mutex;

use crate::models::{
    Attendance, CleaningTask, Complaint, FoodPreference, Payment, Resident, Room, Visit,
};

#[derive(Debug, Default)]
pub struct CollectionCache {
    rooms: Mutex<Vec<Room>>,
    residents: Mutex<Vec<Resident>>,
    payments: Mutex<Vec<Payment>>,
    complaints: Mutex<Vec<Complaint>>,
    visits: Mutex<Vec<Visit>>,
    attendance: Mutex<Vec<Attendance>>,
    food: Mutex<Vec<FoodPreference>>,
    cleaning: Mutex<Vec<CleaningTask>>,
}

fn snapshot<T: Clone>(slot: &Mutex<Vec<T>>) -> Vec<T> {
    slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
}

fn replace<T>(slot: &Mutex<Vec<T>>, items: Vec<T>) {
    *slot.lock().unwrap_or_else(|e| e.into_inner()) = items;
}

impl CollectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooms(&self) -> Vec<Room> {
        snapshot(&self.rooms)
    }

    pub fn set_rooms(&self, rooms: Vec<Room>) {
        replace(&self.rooms, rooms);
    }

    pub fn residents(&self) -> Vec<Resident> {
        snapshot(&self.residents)
    }

    pub fn set_residents(&self, residents: Vec<Resident>) {
        replace(&self.residents, residents);
    }

    pub fn payments(&self) -> Vec<Payment> {
        snapshot(&self.payments)
    }

    pub fn set_payments(&self, payments: Vec<Payment>) {
        replace(&self.payments, payments);
    }

    pub fn complaints(&self) -> Vec<Complaint> {
        snapshot(&self.complaints)
    }

    pub fn set_complaints(&self, complaints: Vec<Complaint>) {
        replace(&self.complaints, complaints);
    }

    pub fn visits(&self) -> Vec<Visit> {
        snapshot(&self.visits)
    }

    pub fn set_visits(&self, visits: Vec<Visit>) {
        replace(&self.visits, visits);
    }

    pub fn attendance(&self) -> Vec<Attendance> {
        snapshot(&self.attendance)
    }

    pub fn set_attendance(&self, attendance: Vec<Attendance>) {
        replace(&self.attendance, attendance);
    }

    pub fn food(&self) -> Vec<FoodPreference> {
        snapshot(&self.food)
    }

    pub fn set_food(&self, food: Vec<FoodPreference>) {
        replace(&self.food, food);
    }

    pub fn cleaning(&self) -> Vec<CleaningTask> {
        snapshot(&self.cleaning)
    }

    pub fn set_cleaning(&self, cleaning: Vec<CleaningTask>) {
        replace(&self.cleaning, cleaning);
    }

    pub fn find_payment(&self, id: u64) -> Option<Payment> {
        self.payments
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub fn find_resident(&self, id: u64) -> Option<Resident> {
        self.residents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub fn find_cleaning_task(&self, id: u64) -> Option<CleaningTask> {
        self.cleaning
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }
}
