pub mod lunch_service;
