mod confirmation;
mod containers;
mod helpers;
mod password_reset;
mod rotation;
