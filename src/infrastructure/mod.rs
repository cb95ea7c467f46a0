pub mod shell_command;
