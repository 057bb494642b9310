pub mod get_record_id;
pub mod jwt;
pub mod time;
pub mod validated_form;
