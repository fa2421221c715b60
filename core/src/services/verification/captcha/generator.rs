//! Captcha text generation and SVG rendering.
//!
//! Produces raw SVG markup; no image library is involved.

use rand::Rng;

/// Characters drawn into captchas. Visually ambiguous glyphs
/// (0, o, 1, i, l in either case) are left out.
pub const CAPTCHA_ALPHABET: &[u8] = b"abcdefghjkmnpqrstuvwxyzABCDEFGHJKMNPQRSTUVWXYZ23456789";

const WIDTH: u32 = 150;
const HEIGHT: u32 = 50;
const NOISE_LINES: usize = 2;
const BACKGROUND: &str = "#f0f0f0";

/// Captcha generator
#[derive(Debug, Clone)]
pub struct CaptchaGenerator {
    /// Number of characters per captcha
    pub length: usize,
}

impl Default for CaptchaGenerator {
    fn default() -> Self {
        Self { length: 4 }
    }
}

impl CaptchaGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Generate a captcha, returning `(text, svg)`
    ///
    /// The text keeps the case it was drawn with; callers compare
    /// case-insensitively.
    pub fn generate(&self) -> (String, String) {
        let text = self.random_text();
        let svg = self.render_svg(&text);
        (text, svg)
    }

    fn random_text(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| CAPTCHA_ALPHABET[rng.gen_range(0..CAPTCHA_ALPHABET.len())] as char)
            .collect()
    }

    fn render_svg(&self, text: &str) -> String {
        let mut rng = rand::thread_rng();

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0,0,{w},{h}">"#,
            w = WIDTH,
            h = HEIGHT
        );
        svg.push_str(&format!(
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            BACKGROUND
        ));

        // Noise curves behind the text
        for _ in 0..NOISE_LINES {
            let start_y = rng.gen_range(5..HEIGHT - 5);
            let end_y = rng.gen_range(5..HEIGHT - 5);
            let ctrl_x = rng.gen_range(WIDTH / 4..WIDTH * 3 / 4);
            let ctrl_y = rng.gen_range(0..HEIGHT);
            svg.push_str(&format!(
                r#"<path d="M{} {} Q{} {} {} {}" stroke="{}" stroke-width="1.5" fill="none"/>"#,
                rng.gen_range(0..10),
                start_y,
                ctrl_x,
                ctrl_y,
                WIDTH - rng.gen_range(0..10),
                end_y,
                random_color(&mut rng)
            ));
        }

        let count = text.chars().count().max(1) as f32;
        let char_width = WIDTH as f32 / (count + 1.0);
        for (i, c) in text.chars().enumerate() {
            let x = char_width * (i as f32 + 0.7);
            let y = 34 + rng.gen_range(-6..6);
            let rotation = rng.gen_range(-20..20);
            svg.push_str(&format!(
                r#"<text x="{x:.1}" y="{y}" font-family="monospace" font-size="30" font-weight="bold" fill="{color}" transform="rotate({rotation} {x:.1} {y})">{c}</text>"#,
                color = random_color(&mut rng),
            ));
        }

        svg.push_str("</svg>");
        svg
    }
}

// Dark enough to read on the light background
fn random_color(rng: &mut impl Rng) -> String {
    format!(
        "rgb({},{},{})",
        rng.gen_range(20..160),
        rng.gen_range(20..160),
        rng.gen_range(20..160)
    )
}
