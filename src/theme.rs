use egui::Color32;

#[derive(Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    /// Whether widgets use egui's dark or light base visuals.
    pub dark: bool,
    pub background: Color32,
    pub panel_background: Color32,
    pub text_color: Color32,
    pub accent_color: Color32,
    pub board_light: Color32,
    pub board_dark: Color32,
    pub queen_color: Color32,
    pub threat_color: Color32,
}

impl Theme {
    pub fn presets() -> Vec<Self> {
        vec![
            Self {
                name: "Classic",
                dark: true,
                background: Color32::from_rgb(40, 40, 40),
                panel_background: Color32::from_rgb(60, 60, 60),
                text_color: Color32::from_rgb(235, 235, 235),
                accent_color: Color32::from_rgb(233, 174, 95),
                board_light: Color32::from_rgb(233, 174, 95),
                board_dark: Color32::from_rgb(128, 128, 128),
                queen_color: Color32::WHITE,
                threat_color: Color32::from_rgba_unmultiplied(255, 0, 0, 40),
            },
            Self {
                name: "Sleek Dark",
                dark: true,
                background: Color32::from_rgb(15, 23, 42),
                panel_background: Color32::from_rgb(30, 41, 59),
                text_color: Color32::from_rgb(226, 232, 240),
                accent_color: Color32::from_rgb(99, 102, 241),
                board_light: Color32::from_rgb(241, 245, 249),
                board_dark: Color32::from_rgb(100, 116, 139),
                queen_color: Color32::from_rgb(15, 23, 42),
                threat_color: Color32::from_rgba_unmultiplied(239, 68, 68, 50),
            },
            Self {
                name: "Paper",
                dark: false,
                background: Color32::from_rgb(240, 240, 230),
                panel_background: Color32::from_rgb(220, 220, 210),
                text_color: Color32::from_rgb(50, 50, 50),
                accent_color: Color32::from_rgb(200, 50, 50),
                board_light: Color32::from_rgb(255, 255, 250),
                board_dark: Color32::from_rgb(200, 200, 190),
                queen_color: Color32::from_rgb(20, 20, 20),
                threat_color: Color32::from_rgba_unmultiplied(200, 50, 50, 40),
            },
        ]
    }

    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = if self.dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.window_fill = self.panel_background;
        visuals.panel_fill = self.panel_background;
        visuals.selection.bg_fill = self.accent_color;
        visuals.widgets.noninteractive.bg_fill = self.background;
        visuals
    }

    /// Preset with the given name, or the first preset when none matches.
    pub fn named(name: &str) -> Self {
        let mut presets = Self::presets();
        let idx = presets.iter().position(|t| t.name == name).unwrap_or(0);
        presets.swap_remove(idx)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::named("Classic")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_uses_the_original_board_colours() {
        let theme = Theme::default();
        assert_eq!(theme.name, "Classic");
        assert_eq!(theme.board_light, Color32::from_rgb(233, 174, 95));
        assert_eq!(theme.board_dark, Color32::from_rgb(128, 128, 128));
    }

    #[test]
    fn light_presets_get_light_visuals() {
        let paper = Theme::named("Paper");
        assert!(!paper.visuals().dark_mode);
        // Widget text must contrast with the panel it sits on.
        let text = paper.visuals().text_color();
        assert!(luma(text) + 60 < luma(paper.panel_background));

        for name in ["Classic", "Sleek Dark"] {
            let theme = Theme::named(name);
            assert!(theme.visuals().dark_mode, "{}", name);
            assert!(luma(theme.visuals().text_color()) > luma(theme.panel_background) + 60);
        }
    }

    fn luma(c: Color32) -> u32 {
        (299 * c.r() as u32 + 587 * c.g() as u32 + 114 * c.b() as u32) / 1000
    }

    #[test]
    fn unknown_name_falls_back_to_first_preset() {
        assert_eq!(Theme::named("Neon Night").name, "Classic");
        assert_eq!(Theme::named("Paper").name, "Paper");
    }
}
