// Placemark services
// Cross-cutting concerns that are not part of the bookmark collection itself.

pub mod preferences;
