//! License header templates.

use kubeforge_core::{
    application::BOILERPLATE_PATH,
    domain::{Creator, License},
};

const APACHE2: &str = include_str!("../../templates/boilerplate-apache2.txt.tmpl");

/// Header file for `license`, or `None` when no header is wanted.
pub fn boilerplate(license: License) -> Option<Creator> {
    match license {
        License::Apache2 => Some(Creator::new("boilerplate", BOILERPLATE_PATH, APACHE2)),
        License::None => None,
    }
}
