fn main() {
    // Only emit ESP-IDF link arguments when building the device firmware.
    // Host builds (tests, sim binary) skip the sysenv probe entirely.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
