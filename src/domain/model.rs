use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apprentice {
    name: String,
}

impl Apprentice {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A permanent member of the roster who may place one order per lunch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    name: String,
    order: Option<String>,
}

impl Employee {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    /// Replaces any order already placed.
    pub fn add_order(&mut self, order: impl Into<String>) {
        self.order = Some(order.into());
    }

    pub fn remove_order(&mut self) {
        self.order = None;
    }
}

/// Someone joining a single lunch. Guests are dropped when the week turns over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    name: String,
    order: Option<String>,
}

impl Guest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order: None,
        }
    }

    pub fn with_order(name: impl Into<String>, order: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order: Some(order.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    pub fn add_order(&mut self, order: impl Into<String>) {
        self.order = Some(order.into());
    }

    pub fn remove_order(&mut self) {
        self.order = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    name: String,
    menu_link: String,
}

impl Restaurant {
    pub fn new(name: impl Into<String>, menu_link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            menu_link: menu_link.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn menu_link(&self) -> &str {
        &self.menu_link
    }
}

/// One week's lunch. The date is fixed at construction; apprentice and
/// restaurant start unset and are replaced on every assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FridayLunch {
    date: NaiveDate,
    apprentice: Option<Apprentice>,
    restaurant: Option<Restaurant>,
}

impl FridayLunch {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            apprentice: None,
            restaurant: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn apprentice(&self) -> Option<&Apprentice> {
        self.apprentice.as_ref()
    }

    pub fn restaurant(&self) -> Option<&Restaurant> {
        self.restaurant.as_ref()
    }

    pub fn assign_apprentice(&mut self, apprentice: Apprentice) {
        self.apprentice = Some(apprentice);
    }

    pub fn assign_restaurant(&mut self, restaurant: Restaurant) {
        self.restaurant = Some(restaurant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 3).unwrap()
    }

    #[test]
    fn test_new_lunch_has_nothing_assigned() {
        let lunch = FridayLunch::new(friday());
        assert_eq!(lunch.date(), friday());
        assert!(lunch.apprentice().is_none());
        assert!(lunch.restaurant().is_none());
    }

    #[test]
    fn test_reassignment_replaces_value() {
        let mut lunch = FridayLunch::new(friday());
        lunch.assign_apprentice(Apprentice::new("Priya"));
        lunch.assign_apprentice(Apprentice::new("Ced"));
        lunch.assign_restaurant(Restaurant::new("Nandos", "http://nandos"));
        lunch.assign_restaurant(Restaurant::new("Deliveroo", "http://menu"));

        assert_eq!(lunch.apprentice().map(Apprentice::name), Some("Ced"));
        assert_eq!(lunch.restaurant().map(Restaurant::name), Some("Deliveroo"));
        assert_eq!(lunch.date(), friday());
    }

    #[test]
    fn test_employee_order_lifecycle() {
        let mut employee = Employee::new("Nick");
        assert_eq!(employee.order(), None);

        employee.add_order("Peri Peri Chicken");
        assert_eq!(employee.order(), Some("Peri Peri Chicken"));

        employee.add_order("Tuna Melt");
        assert_eq!(employee.order(), Some("Tuna Melt"));

        employee.remove_order();
        assert_eq!(employee.order(), None);
    }

    #[test]
    fn test_guest_with_order() {
        let mut guest = Guest::with_order("Gary", "Tuna Melt");
        assert_eq!(guest.name(), "Gary");
        assert_eq!(guest.order(), Some("Tuna Melt"));
        guest.remove_order();
        assert_eq!(guest.order(), None);
    }
}
