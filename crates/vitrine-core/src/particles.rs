//! Decorative particle field
//!
//! Appends `count` particles to the `#particles` container, each with a random
//! position and a random animation delay/duration.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::dom::{Document, ElementId};

const MAX_DELAY_SECS: f64 = 6.0;
const MIN_DURATION_SECS: f64 = 3.0;
const MAX_DURATION_SECS: f64 = 6.0;

/// Placement and timing of one particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    /// Horizontal position, percent of the container
    pub left: f64,
    /// Vertical position, percent of the container
    pub top: f64,
    /// Seconds before the float animation starts
    pub delay: f64,
    /// Seconds per float cycle
    pub duration: f64,
}

impl Particle {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            left: rng.random_range(0.0..100.0),
            top: rng.random_range(0.0..100.0),
            delay: rng.random_range(0.0..MAX_DELAY_SECS),
            duration: rng.random_range(MIN_DURATION_SECS..MAX_DURATION_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    container: Option<ElementId>,
    particles: Vec<(ElementId, Particle)>,
}

impl ParticleField {
    pub fn new(doc: &Document) -> Self {
        Self {
            container: doc.element_by_id("particles"),
            particles: Vec::new(),
        }
    }

    /// Generate the particles; a page without a container gets none
    pub fn start<R: Rng + ?Sized>(&mut self, doc: &mut Document, count: usize, rng: &mut R) {
        let Some(container) = self.container else {
            debug!("No particle container, skipping particle field");
            return;
        };

        for _ in 0..count {
            let particle = Particle::random(rng);
            let id = doc.create_element("div");
            doc.add_class(id, "particle");
            doc.set_style(id, "left", &format!("{}%", particle.left));
            doc.set_style(id, "top", &format!("{}%", particle.top));
            doc.set_style(id, "animation-delay", &format!("{}s", particle.delay));
            doc.set_style(id, "animation-duration", &format!("{}s", particle.duration));
            doc.append_child(container, id);
            self.particles.push((id, particle));
        }
        debug!("Created {} particles", self.particles.len());
    }

    /// Remove every generated particle from the page
    pub fn stop(&mut self, doc: &mut Document) {
        for (id, _) in self.particles.drain(..) {
            doc.remove(id);
        }
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().map(|(_, p)| p)
    }
}
