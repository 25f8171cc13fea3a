use crate::domain::model::{Apprentice, Employee, FridayLunch, Guest, Restaurant};
use crate::utils::error::Result;

/// Persistence boundary for the lunch collections.
///
/// Every call reads or overwrites one whole collection. Nothing is cached
/// between calls, and there is no transaction spanning two collections.
pub trait Storage {
    fn get_schedule(&self) -> Result<Vec<FridayLunch>>;
    fn save_schedule(&mut self, schedule: &[FridayLunch]) -> Result<()>;

    fn get_apprentices(&self) -> Result<Vec<Apprentice>>;
    fn get_restaurants(&self) -> Result<Vec<Restaurant>>;

    fn get_employees(&self) -> Result<Vec<Employee>>;
    fn save_employees(&mut self, employees: &[Employee]) -> Result<()>;

    fn get_guests(&self) -> Result<Vec<Guest>>;
    fn save_guests(&mut self, guests: &[Guest]) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_schedule(&self) -> Result<Vec<FridayLunch>> {
        (**self).get_schedule()
    }

    fn save_schedule(&mut self, schedule: &[FridayLunch]) -> Result<()> {
        (**self).save_schedule(schedule)
    }

    fn get_apprentices(&self) -> Result<Vec<Apprentice>> {
        (**self).get_apprentices()
    }

    fn get_restaurants(&self) -> Result<Vec<Restaurant>> {
        (**self).get_restaurants()
    }

    fn get_employees(&self) -> Result<Vec<Employee>> {
        (**self).get_employees()
    }

    fn save_employees(&mut self, employees: &[Employee]) -> Result<()> {
        (**self).save_employees(employees)
    }

    fn get_guests(&self) -> Result<Vec<Guest>> {
        (**self).get_guests()
    }

    fn save_guests(&mut self, guests: &[Guest]) -> Result<()> {
        (**self).save_guests(guests)
    }
}
