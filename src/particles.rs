//! Configuration handed to the `particlesJS` library for the page background.
//! Field names follow the library's JSON schema.

use serde::Serialize;

pub const PARTICLES_CONTAINER_ID: &str = "particles-js";
pub const PARTICLES_GLOBAL: &str = "particlesJS";

#[derive(Clone, Debug, Serialize)]
pub struct ParticlesConfig {
    pub particles: Particles,
    pub interactivity: Interactivity,
    pub retina_detect: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Particles {
    pub number: ParticleNumber,
    pub color: ColorList,
    pub shape: Shape,
    pub opacity: AnimatedValue,
    pub size: AnimatedValue,
    pub line_linked: LineLinked,
    #[serde(rename = "move")]
    pub movement: Movement,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParticleNumber {
    pub value: u32,
    pub density: Density,
}

#[derive(Clone, Debug, Serialize)]
pub struct Density {
    pub enable: bool,
    pub value_area: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct ColorList {
    pub value: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: String,
    pub stroke: Stroke,
    pub polygon: Polygon,
}

#[derive(Clone, Debug, Serialize)]
pub struct Stroke {
    pub width: u32,
    pub color: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Polygon {
    pub nb_sides: u32,
}

/// Shared shape of the `opacity` and `size` sections; only the animation's
/// floor key differs.
#[derive(Clone, Debug, Serialize)]
pub struct AnimatedValue {
    pub value: f64,
    pub random: bool,
    pub anim: ValueAnimation,
}

#[derive(Clone, Debug, Serialize)]
pub struct ValueAnimation {
    pub enable: bool,
    pub speed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_min: Option<f64>,
    pub sync: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct LineLinked {
    pub enable: bool,
    pub distance: u32,
    pub color: String,
    pub opacity: f64,
    pub width: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct Movement {
    pub enable: bool,
    pub speed: f64,
    pub direction: String,
    pub random: bool,
    pub straight: bool,
    pub out_mode: String,
    pub bounce: bool,
    pub attract: Attract,
}

#[derive(Clone, Debug, Serialize)]
pub struct Attract {
    pub enable: bool,
    #[serde(rename = "rotateX")]
    pub rotate_x: u32,
    #[serde(rename = "rotateY")]
    pub rotate_y: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct Interactivity {
    pub detect_on: String,
    pub events: InteractivityEvents,
    pub modes: Modes,
}

#[derive(Clone, Debug, Serialize)]
pub struct InteractivityEvents {
    pub onhover: EventMode,
    pub onclick: EventMode,
    pub resize: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct EventMode {
    pub enable: bool,
    pub mode: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Modes {
    pub grab: Grab,
    pub bubble: Bubble,
    pub repulse: Repulse,
    pub push: ParticleCount,
    pub remove: ParticleCount,
}

#[derive(Clone, Debug, Serialize)]
pub struct Grab {
    pub distance: u32,
    pub line_linked: GrabLine,
}

#[derive(Clone, Debug, Serialize)]
pub struct GrabLine {
    pub opacity: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Bubble {
    pub distance: u32,
    pub size: f64,
    pub duration: f64,
    pub opacity: f64,
    pub speed: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Repulse {
    pub distance: u32,
    pub duration: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParticleCount {
    pub particles_nb: u32,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            particles: Particles {
                number: ParticleNumber {
                    value: 80,
                    density: Density {
                        enable: true,
                        value_area: 800,
                    },
                },
                color: ColorList {
                    value: ["#00f0ff", "#ffa500", "#4f46e5"]
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                },
                shape: Shape {
                    kind: "circle".to_string(),
                    stroke: Stroke {
                        width: 0,
                        color: "#000000".to_string(),
                    },
                    polygon: Polygon { nb_sides: 5 },
                },
                opacity: AnimatedValue {
                    value: 0.5,
                    random: true,
                    anim: ValueAnimation {
                        enable: true,
                        speed: 0.5,
                        opacity_min: Some(0.1),
                        size_min: None,
                        sync: false,
                    },
                },
                size: AnimatedValue {
                    value: 3.0,
                    random: true,
                    anim: ValueAnimation {
                        enable: true,
                        speed: 5.0,
                        opacity_min: None,
                        size_min: Some(0.1),
                        sync: false,
                    },
                },
                line_linked: LineLinked {
                    enable: true,
                    distance: 150,
                    color: "#ffffff".to_string(),
                    opacity: 0.4,
                    width: 1,
                },
                movement: Movement {
                    enable: true,
                    speed: 3.0,
                    direction: "none".to_string(),
                    random: false,
                    straight: false,
                    out_mode: "out".to_string(),
                    bounce: false,
                    attract: Attract {
                        enable: false,
                        rotate_x: 600,
                        rotate_y: 1200,
                    },
                },
            },
            interactivity: Interactivity {
                detect_on: "canvas".to_string(),
                events: InteractivityEvents {
                    onhover: EventMode {
                        enable: true,
                        mode: "repulse".to_string(),
                    },
                    onclick: EventMode {
                        enable: true,
                        mode: "push".to_string(),
                    },
                    resize: true,
                },
                modes: Modes {
                    grab: Grab {
                        distance: 400,
                        line_linked: GrabLine { opacity: 1.0 },
                    },
                    bubble: Bubble {
                        distance: 250,
                        size: 0.0,
                        duration: 2.0,
                        opacity: 0.0,
                        speed: 3.0,
                    },
                    repulse: Repulse {
                        distance: 100,
                        duration: 0.4,
                    },
                    push: ParticleCount { particles_nb: 4 },
                    remove: ParticleCount { particles_nb: 2 },
                },
            },
            retina_detect: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn config_json() -> Value {
        serde_json::to_value(ParticlesConfig::default()).expect("config serializes")
    }

    #[test]
    fn uses_library_key_names() {
        let json = config_json();

        assert_eq!(json["particles"]["number"]["density"]["value_area"], 800);
        assert_eq!(json["particles"]["shape"]["type"], "circle");
        assert_eq!(json["particles"]["move"]["out_mode"], "out");
        assert_eq!(json["particles"]["move"]["attract"]["rotateX"], 600);
        assert_eq!(json["interactivity"]["modes"]["push"]["particles_nb"], 4);
        assert_eq!(json["retina_detect"], true);
    }

    #[test]
    fn animation_floors_only_appear_where_they_apply() {
        let json = config_json();
        let opacity_anim = &json["particles"]["opacity"]["anim"];
        let size_anim = &json["particles"]["size"]["anim"];

        assert_eq!(opacity_anim["opacity_min"], 0.1);
        assert!(opacity_anim.get("size_min").is_none());
        assert_eq!(size_anim["size_min"], 0.1);
        assert!(size_anim.get("opacity_min").is_none());
    }

    #[test]
    fn palette_and_interaction_modes() {
        let json = config_json();

        assert_eq!(
            json["particles"]["color"]["value"],
            serde_json::json!(["#00f0ff", "#ffa500", "#4f46e5"])
        );
        assert_eq!(json["interactivity"]["events"]["onhover"]["mode"], "repulse");
        assert_eq!(json["interactivity"]["events"]["onclick"]["mode"], "push");
    }
}
