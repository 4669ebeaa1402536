use std::collections::VecDeque;
use rand::Rng;
use raylib::prelude::*;
use crate::constants::*;
use crate::engine::{Engine, Stage};

const BRIGHT_GREEN: Color = Color::new(50, 255, 50, 255);
const GRID: Color = Color::new(40, 40, 40, 255);
const GRAPH_BACKGROUND: Color = Color::new(20, 20, 20, 255);
const RADAR_BACKGROUND: Color = Color::new(0, 50, 0, 255);
const RADAR_GRID: Color = Color::new(0, 100, 0, 255);

/// A fake usage series: a sine wave with noise, clamped to percent.
struct Series {
    base: f32,
    swing: f32,
    frequency: f32,
    noise: f32,
    samples: VecDeque<f32>,
}

impl Series {
    fn new(base: f32, swing: f32, frequency: f32, noise: f32) -> Self {
        Self { base, swing, frequency, noise, samples: VecDeque::with_capacity(GRAPH_SAMPLES + 1) }
    }

    fn push<R: Rng + ?Sized>(&mut self, rng: &mut R, time: u32) {
        let value = self.base
            + self.swing * (time as f32 * self.frequency).sin()
            + rng.random_range(-self.noise..=self.noise);
        self.samples.push_back(value.clamp(0.0, 100.0));
        if self.samples.len() > GRAPH_SAMPLES {
            self.samples.pop_front();
        }
    }
}

/// Fake system monitor: usage graphs, a radar sweep and pulsing rings.
pub struct SystemMonitor {
    time: u32,
    pulse_radius: i32,
    pulse_growing: bool,
    cpu: Series,
    memory: Series,
    network: Series,
    blips: Vec<(f32, f32)>, // (angle in radians, distance as a fraction of the radius)
    toggle_timer: u32,
}

impl SystemMonitor {
    pub fn new() -> Self {
        Self {
            time: 0,
            pulse_radius: 0,
            pulse_growing: true,
            cpu: Series::new(30.0, 20.0, 0.1, 10.0),
            memory: Series::new(50.0, 15.0, 0.05, 5.0),
            network: Series::new(40.0, 30.0, 0.08, 15.0),
            blips: Vec::new(),
            toggle_timer: 0,
        }
    }

    fn step(&mut self) {
        let mut rng = rand::rng();
        self.time += 1;

        if self.pulse_growing {
            self.pulse_radius += 2;
            if self.pulse_radius > 50 {
                self.pulse_growing = false;
            }
        } else {
            self.pulse_radius -= 2;
            if self.pulse_radius < 0 {
                self.pulse_growing = true;
            }
        }

        self.cpu.push(&mut rng, self.time);
        self.memory.push(&mut rng, self.time);
        self.network.push(&mut rng, self.time);

        let count = rng.random_range(2..=5);
        self.blips = (0..count)
            .map(|_| (rng.random_range(0.0..std::f32::consts::TAU), rng.random_range(0.3..0.9)))
            .collect();
    }

    fn draw_panel(&self, d: &mut RaylibDrawHandle, x: i32, y: i32, width: i32, height: i32) {
        d.draw_rectangle(x, y, width, height, Color::BLACK);
        d.draw_rectangle_lines_ex(
            Rectangle::new(x as f32, y as f32, width as f32, height as f32),
            2.0,
            Color::GREEN,
        );
        d.draw_text("SYSTEM MONITOR", x + 10, y + 10, 20, BRIGHT_GREEN);

        draw_line_graph(d, x + 10, y + 60, width - 20, 70, &self.cpu.samples, Color::RED, "CPU Usage");
        draw_line_graph(d, x + 10, y + 150, width - 20, 70, &self.memory.samples, Color::BLUE, "Memory Usage");
        draw_line_graph(d, x + 10, y + 240, width - 20, 70, &self.network.samples, Color::YELLOW, "Network Traffic");
    }

    fn draw_radar(&self, d: &mut RaylibDrawHandle, center_x: i32, center_y: i32, radius: i32) {
        d.draw_circle(center_x, center_y, radius as f32, RADAR_BACKGROUND);
        d.draw_circle_lines(center_x, center_y, radius as f32, Color::GREEN);
        for ring in 1..4 {
            d.draw_circle_lines(center_x, center_y, (radius * ring / 4) as f32, RADAR_GRID);
        }
        d.draw_line(center_x - radius, center_y, center_x + radius, center_y, RADAR_GRID);
        d.draw_line(center_x, center_y - radius, center_x, center_y + radius, RADAR_GRID);

        let sweep = ((self.time * 2) % 360) as f32;
        let (sin, cos) = sweep.to_radians().sin_cos();
        let center = Vector2::new(center_x as f32, center_y as f32);
        let tip = Vector2::new(center.x + radius as f32 * cos, center.y + radius as f32 * sin);
        d.draw_line_ex(center, tip, 2.0, BRIGHT_GREEN);

        for (angle, distance) in &self.blips {
            let reach = distance * radius as f32;
            d.draw_circle(
                center_x + (reach * angle.cos()) as i32,
                center_y + (reach * angle.sin()) as i32,
                2.0,
                Color::YELLOW,
            );
        }
    }

    fn draw_pulse(&self, d: &mut RaylibDrawHandle, center_x: i32, center_y: i32) {
        for ring in 0..3 {
            let radius = (self.pulse_radius + ring * 20).max(0) as f32;
            let alpha = (255 - ring * 80).max(0) as u8;
            d.draw_circle_lines(center_x, center_y, radius, Color::new(0, 255, 0, alpha));
        }
    }
}

impl Engine for SystemMonitor {
    fn update(&mut self, stage: &mut Stage) {
        self.step();

        self.toggle_timer += 1;
        if self.toggle_timer > GRAPH_TOGGLE_INTERVAL {
            self.toggle_timer = 0;
            stage.show_graphs = !stage.show_graphs;
        }
    }

    fn draw(&self, stage: &Stage, d: &mut RaylibDrawHandle) {
        if !stage.show_graphs {
            return;
        }
        let width = stage.bounds.width;
        let height = stage.bounds.height;

        self.draw_panel(d, width - 320, 20, 300, 320);
        self.draw_radar(d, 150, height - 150, 100);
        self.draw_pulse(d, width - 100, height - 100);
    }
}

fn draw_line_graph(
    d: &mut RaylibDrawHandle,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    data: &VecDeque<f32>,
    color: Color,
    label: &str,
) {
    if data.len() < 2 {
        return;
    }

    d.draw_text(label, x, y - 14, 10, Color::WHITE);
    d.draw_rectangle(x, y, width, height, GRAPH_BACKGROUND);
    d.draw_rectangle_lines(x, y, width, height, Color::GRAY);

    for i in (0..width).step_by(20) {
        d.draw_line(x + i, y, x + i, y + height, GRID);
    }
    for i in (0..height).step_by(20) {
        d.draw_line(x, y + i, x + width, y + i, GRID);
    }

    let last = (data.len() - 1) as f32;
    let points: Vec<Vector2> = data
        .iter()
        .enumerate()
        .map(|(i, value)| {
            Vector2::new(
                x as f32 + i as f32 / last * width as f32,
                (y + height) as f32 - value / 100.0 * height as f32,
            )
        })
        .collect();

    for pair in points.windows(2) {
        d.draw_line_ex(pair[0], pair[1], 2.0, color);
    }

    if let (Some(point), Some(value)) = (points.last(), data.back()) {
        d.draw_circle(point.x as i32, point.y as i32, 3.0, color);
        d.draw_text(&format!("{:.1}%", value), point.x as i32 + 5, point.y as i32 - 10, 10, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_are_clamped_and_bounded() {
        let mut monitor = SystemMonitor::new();
        for _ in 0..250 {
            monitor.step();
        }
        for series in [&monitor.cpu, &monitor.memory, &monitor.network] {
            assert_eq!(series.samples.len(), GRAPH_SAMPLES);
            assert!(series.samples.iter().all(|v| (0.0..=100.0).contains(v)));
        }
    }

    #[test]
    fn pulse_bounces() {
        let mut monitor = SystemMonitor::new();
        let mut peak = 0;
        let mut shrank = false;
        for _ in 0..100 {
            let before = monitor.pulse_radius;
            monitor.step();
            peak = peak.max(monitor.pulse_radius);
            shrank |= monitor.pulse_radius < before;
            assert!((-2..=52).contains(&monitor.pulse_radius));
        }
        assert!(shrank);
        assert_eq!(peak, 52);
    }

    #[test]
    fn radar_has_a_few_blips() {
        let mut monitor = SystemMonitor::new();
        monitor.step();
        assert!((2..=5).contains(&monitor.blips.len()));
        assert!(monitor.blips.iter().all(|(_, distance)| (0.3..0.9).contains(distance)));
    }

    #[test]
    fn graphs_toggle_on_their_own() {
        let mut stage = Stage::new(crate::slideshow::placement::Size::new(800, 600), crate::sound::SoundBank::silent());
        let mut monitor = SystemMonitor::new();
        for _ in 0..GRAPH_TOGGLE_INTERVAL {
            monitor.update(&mut stage);
        }
        assert!(!stage.show_graphs);
        monitor.update(&mut stage);
        assert!(stage.show_graphs);
    }
}
