use std::env::args;
use std::fs::write;
use png::Encoder;
use png::ColorType::Rgba;
use png::BitDepth::Eight;
use rgb::{ComponentBytes, RGBA8};
use tricurve::*;
use tricurve::drawing::{push_crosshair, push_polyline};
use std::time::Instant;

fn main() {
	let png_name = args().nth(1).unwrap_or("curve.png".into());
	let (w, h) = (300, 300);

	let start = Couple::new(40.0, 200.0);
	let control = Couple::new(150.0, 260.0);
	let end = Couple::new(260.0, 120.0);

	let mut guides = Path::new();
	push_polyline(&[start, control, end], &mut guides);
	push_crosshair(control, 6.0, &mut guides);

	let mut ordering = Path::new();
	let curve = build_curve(start, control, end, &mut ordering).unwrap();
	curve.log();

	let config = CurveConfig {
		sweep_rule: SweepRule::ThroughControl,
		..CurveConfig::default()
	};
	let mut through = Path::new();
	build_curve_with(&config, start, control, end, &mut through).unwrap();

	let mut canvas = Canvas::new(w, h);
	let now = Instant::now();
	canvas.stroke::<4>(&guides, 1.0, RGBA8::new(120, 120, 120, 255));
	canvas.stroke::<4>(&ordering, 3.0, RGBA8::new(220, 60, 40, 255));
	canvas.stroke::<4>(&through, 3.0, RGBA8::new(40, 120, 220, 200));
	println!("rendered in {}us.", now.elapsed().as_micros());

	let mut png_buf = Vec::new();
	{
		let mut encoder = Encoder::new(&mut png_buf, w as u32, h as u32);
		encoder.set_color(Rgba);
		encoder.set_depth(Eight);
		let mut writer = encoder.write_header().unwrap();
		writer.write_image_data(canvas.pixels().as_bytes()).unwrap();
	}
	write(&png_name, &png_buf).unwrap();
}
