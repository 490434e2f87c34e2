// Prevents additional console window on Windows in release, DO NOT REMOVE
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    #[cfg(not(target_os = "android"))]
    {
        if let Err(err) = demo::run().run_desktop() {
            eprintln!("App failed to run: {err}");
        }
    }
}
