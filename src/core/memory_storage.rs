use crate::domain::model::{Apprentice, Employee, FridayLunch, Guest, Restaurant};
use crate::domain::ports::Storage;
use crate::utils::error::Result;

/// Storage kept entirely in process memory. Reads hand out copies, so
/// callers get the same load/mutate/save cycle as with the file backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    schedule: Vec<FridayLunch>,
    apprentices: Vec<Apprentice>,
    restaurants: Vec<Restaurant>,
    employees: Vec<Employee>,
    guests: Vec<Guest>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule(mut self, schedule: Vec<FridayLunch>) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_apprentices(mut self, apprentices: Vec<Apprentice>) -> Self {
        self.apprentices = apprentices;
        self
    }

    pub fn with_restaurants(mut self, restaurants: Vec<Restaurant>) -> Self {
        self.restaurants = restaurants;
        self
    }

    pub fn with_employees(mut self, employees: Vec<Employee>) -> Self {
        self.employees = employees;
        self
    }

    pub fn with_guests(mut self, guests: Vec<Guest>) -> Self {
        self.guests = guests;
        self
    }
}

impl Storage for MemoryStorage {
    fn get_schedule(&self) -> Result<Vec<FridayLunch>> {
        Ok(self.schedule.clone())
    }

    fn save_schedule(&mut self, schedule: &[FridayLunch]) -> Result<()> {
        self.schedule = schedule.to_vec();
        Ok(())
    }

    fn get_apprentices(&self) -> Result<Vec<Apprentice>> {
        Ok(self.apprentices.clone())
    }

    fn get_restaurants(&self) -> Result<Vec<Restaurant>> {
        Ok(self.restaurants.clone())
    }

    fn get_employees(&self) -> Result<Vec<Employee>> {
        Ok(self.employees.clone())
    }

    fn save_employees(&mut self, employees: &[Employee]) -> Result<()> {
        self.employees = employees.to_vec();
        Ok(())
    }

    fn get_guests(&self) -> Result<Vec<Guest>> {
        Ok(self.guests.clone())
    }

    fn save_guests(&mut self, guests: &[Guest]) -> Result<()> {
        self.guests = guests.to_vec();
        Ok(())
    }
}
