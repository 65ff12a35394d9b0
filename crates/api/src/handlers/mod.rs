pub mod callback;
pub mod da4revit;
pub mod viewables;
