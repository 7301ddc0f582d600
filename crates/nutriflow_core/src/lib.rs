pub mod booking;
pub mod catalog;
pub mod domain;
pub mod ports;

pub use booking::{upcoming_dates, BookingError, BookingFlow};
pub use domain::{BlogTopic, Booking, Coach, DayPlan, MacroNutrients, Meal, MealPlan, UserProfile};
pub use ports::{ArticleService, MealPlanService, PortError, PortResult};
