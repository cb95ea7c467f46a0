pub mod click_handler;
pub mod command_service;
pub mod status;
pub mod status_poller;

#[cfg(test)]
pub mod testing;
