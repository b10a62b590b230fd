//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_usize(&self, section: &str, key: &str, default: usize) -> usize;
    fn get_u32(&self, section: &str, key: &str, default: u32) -> u32;
    fn get_f64(&self, section: &str, key: &str, default: f64) -> f64;
}
