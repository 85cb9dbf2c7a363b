use super::surface::ControlId;

pub const BUTTON_GENERATE: ControlId = ControlId::new(1001);
pub const REGION_LOADING: ControlId = ControlId::new(2001);
pub const REGION_RESULT: ControlId = ControlId::new(2002);
pub const REGION_PREVIEW: ControlId = ControlId::new(2003);
pub const REGION_DETAILS: ControlId = ControlId::new(2004);

pub const CLASS_RESULT_SUCCESS: &str = "resultado sucesso";
pub const CLASS_RESULT_ERROR: &str = "resultado erro";

pub const LOADING_TEXT: &str = "Generating presentation...";
pub const DETAILS_SUMMARY: &str = "Show technical details";
