pub mod about_card;
pub mod about_fields;
pub mod field_error;
pub mod form_status;
pub mod interest_card;
pub mod interest_editor;
pub mod password_input;
pub mod site_header;
pub mod welcome_card;
