use crate::core::rota;
use crate::domain::model::{Apprentice, Employee, FridayLunch, Guest, Restaurant};
use crate::domain::ports::Storage;
use crate::utils::error::{LunchError, Result};
use crate::utils::validation::validate_non_empty_string;
use chrono::NaiveDate;
use serde::Serialize;

/// Everything the lunch page shows, loaded in one go.
#[derive(Debug, Clone, Serialize)]
pub struct LunchOverview {
    pub schedule: Vec<FridayLunch>,
    pub apprentices: Vec<Apprentice>,
    pub restaurants: Vec<Restaurant>,
    pub employees: Vec<Employee>,
    pub guests: Vec<Guest>,
}

impl LunchOverview {
    /// The lunch currently being organised.
    pub fn current_lunch(&self) -> Option<&FridayLunch> {
        self.schedule.first()
    }
}

/// Lunch operations as load, mutate, save cycles over a [`Storage`].
///
/// Every mutating call takes `&mut self`, so one service is one writer.
/// Share it between threads behind a `Mutex` to keep cycles from
/// interleaving.
pub struct LunchService<S: Storage> {
    storage: S,
    rota_weeks: usize,
}

impl<S: Storage> LunchService<S> {
    pub fn new(storage: S, rota_weeks: usize) -> Self {
        Self {
            storage,
            rota_weeks,
        }
    }

    pub fn overview(&self) -> Result<LunchOverview> {
        Ok(LunchOverview {
            schedule: self.storage.get_schedule()?,
            apprentices: self.storage.get_apprentices()?,
            restaurants: self.storage.get_restaurants()?,
            employees: self.storage.get_employees()?,
            guests: self.storage.get_guests()?,
        })
    }

    pub fn change_apprentice(&mut self, position: usize, new_name: &str) -> Result<()> {
        validate_non_empty_string("apprentice name", new_name)?;

        let mut schedule = self.storage.get_schedule()?;
        let len = schedule.len();
        let lunch = schedule
            .get_mut(position)
            .ok_or(LunchError::InvalidSelection {
                what: "lunch",
                index: position,
                len,
            })?;
        lunch.assign_apprentice(Apprentice::new(new_name));
        tracing::info!("{} is now the apprentice for {}", new_name, lunch.date());

        self.storage.save_schedule(&schedule)
    }

    /// Picks the restaurant at `restaurant_index` for the current lunch.
    pub fn assign_menu(&mut self, restaurant_index: usize) -> Result<Restaurant> {
        let restaurants = self.storage.get_restaurants()?;
        let restaurant = restaurants
            .get(restaurant_index)
            .cloned()
            .ok_or(LunchError::InvalidSelection {
                what: "restaurant",
                index: restaurant_index,
                len: restaurants.len(),
            })?;

        let mut schedule = self.storage.get_schedule()?;
        let lunch = schedule.first_mut().ok_or(LunchError::EmptySchedule)?;
        lunch.assign_restaurant(restaurant.clone());
        tracing::info!("Menu for {} is {}", lunch.date(), restaurant.name());

        self.storage.save_schedule(&schedule)?;
        Ok(restaurant)
    }

    pub fn place_order(&mut self, employee_index: usize, order: &str) -> Result<()> {
        validate_non_empty_string("order", order)?;

        let mut employees = self.storage.get_employees()?;
        let employee = select_employee(&mut employees, employee_index)?;
        employee.add_order(order);
        tracing::info!("{} ordered {}", employee.name(), order);

        self.storage.save_employees(&employees)
    }

    pub fn remove_order(&mut self, employee_index: usize) -> Result<()> {
        let mut employees = self.storage.get_employees()?;
        let employee = select_employee(&mut employees, employee_index)?;
        employee.remove_order();
        tracing::info!("Removed order for {}", employee.name());

        self.storage.save_employees(&employees)
    }

    pub fn add_guest(&mut self, name: &str, order: &str) -> Result<()> {
        validate_non_empty_string("guest name", name)?;
        validate_non_empty_string("order", order)?;

        let mut guests = self.storage.get_guests()?;
        guests.push(Guest::with_order(name, order));
        tracing::info!("Added guest {} ordering {}", name, order);

        self.storage.save_guests(&guests)
    }

    /// Rolls the schedule forward to `today`. When a past lunch drops off the
    /// week has turned over, so every order is cleared and guests leave.
    ///
    /// The schedule is saved last: it is what marks the week as turned over,
    /// so a failed run can simply be repeated.
    pub fn update_rota(&mut self, today: NaiveDate) -> Result<usize> {
        let apprentices = self.storage.get_apprentices()?;
        let mut schedule = self.storage.get_schedule()?;

        let dropped = rota::update(&mut schedule, &apprentices, today, self.rota_weeks);

        if dropped > 0 {
            tracing::info!("{} past lunch(es) dropped, clearing orders and guests", dropped);
            let mut employees = self.storage.get_employees()?;
            employees.iter_mut().for_each(Employee::remove_order);
            self.storage.save_employees(&employees)?;
            self.storage.save_guests(&[])?;
        }

        self.storage.save_schedule(&schedule)?;
        Ok(dropped)
    }
}

fn select_employee(employees: &mut [Employee], index: usize) -> Result<&mut Employee> {
    let len = employees.len();
    employees.get_mut(index).ok_or(LunchError::InvalidSelection {
        what: "employee",
        index,
        len,
    })
}
