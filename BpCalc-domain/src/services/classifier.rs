use crate::entities::reading::Category;

/// Categorize blood pressure. Rules are evaluated top to bottom and the
/// first match wins; pairs matching no rule are `Unclassifiable`.
pub fn classify_reading(systolic: i32, diastolic: i32) -> Category {
    if systolic < 90 && diastolic < 60 {
        Category::Low
    } else if systolic < 120 && diastolic < 80 {
        Category::Ideal
    } else if systolic < 140 && diastolic < 90 {
        Category::PreHigh
    } else if systolic <= 190 && diastolic <= 100 {
        Category::High
    } else {
        Category::Unclassifiable
    }
}
