// Hue v1 error types
pub const ERR_UNAUTHORIZED_USER: i32 = 1;
pub const ERR_LINK_BUTTON_NOT_PRESSED: i32 = 101;
