use crate::Error;
use std::{convert::TryFrom, fmt, str::FromStr};

/// An RGB color. Colors parse from matplotlib color names (`"k"`, `"red"`, `"tab:blue"`, `"C3"`) and from `#rrggbb` hex strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Color {
	pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
	pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
	pub const TAB_BLUE: Color = Color::rgb(0x1f, 0x77, 0xb4);

	/// The tableau palette used as the default color cycle.
	pub const CYCLE: [Color; 10] = [
		Color::TAB_BLUE,
		Color::rgb(0xff, 0x7f, 0x0e),
		Color::rgb(0x2c, 0xa0, 0x2c),
		Color::rgb(0xd6, 0x27, 0x28),
		Color::rgb(0x94, 0x67, 0xbd),
		Color::rgb(0x8c, 0x56, 0x4b),
		Color::rgb(0xe3, 0x77, 0xc2),
		Color::rgb(0x7f, 0x7f, 0x7f),
		Color::rgb(0xbc, 0xbd, 0x22),
		Color::rgb(0x17, 0xbe, 0xcf),
	];

	pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
		Color { r, g, b }
	}

	fn from_hex(value: &str) -> Option<Color> {
		let hex = value.strip_prefix('#')?;
		if hex.len() != 6 || !hex.is_ascii() {
			return None;
		}
		let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
		Some(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
	}
}

impl FromStr for Color {
	type Err = Error;
	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let color = match value {
			"k" | "black" => Color::BLACK,
			"w" | "white" => Color::WHITE,
			"r" | "red" => Color::rgb(0xff, 0x00, 0x00),
			"g" | "green" => Color::rgb(0x00, 0x80, 0x00),
			"b" | "blue" => Color::rgb(0x00, 0x00, 0xff),
			"c" | "cyan" => Color::rgb(0x00, 0xbf, 0xbf),
			"m" | "magenta" => Color::rgb(0xbf, 0x00, 0xbf),
			"y" | "yellow" => Color::rgb(0xbf, 0xbf, 0x00),
			"gray" | "grey" => Color::rgb(0x80, 0x80, 0x80),
			"orange" => Color::rgb(0xff, 0xa5, 0x00),
			"tab:blue" | "C0" => Color::CYCLE[0],
			"tab:orange" | "C1" => Color::CYCLE[1],
			"tab:green" | "C2" => Color::CYCLE[2],
			"tab:red" | "C3" => Color::CYCLE[3],
			"tab:purple" | "C4" => Color::CYCLE[4],
			"tab:brown" | "C5" => Color::CYCLE[5],
			"tab:pink" | "C6" => Color::CYCLE[6],
			"tab:gray" | "tab:grey" | "C7" => Color::CYCLE[7],
			"tab:olive" | "C8" => Color::CYCLE[8],
			"tab:cyan" | "C9" => Color::CYCLE[9],
			_ => Color::from_hex(value).ok_or_else(|| Error::InvalidColor(value.to_owned()))?,
		};
		Ok(color)
	}
}

impl TryFrom<String> for Color {
	type Error = Error;
	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

#[test]
fn test_parse_color() {
	assert_eq!("k".parse::<Color>().unwrap(), Color::BLACK);
	assert_eq!("tab:blue".parse::<Color>().unwrap(), Color::TAB_BLUE);
	assert_eq!("C3".parse::<Color>().unwrap(), Color::rgb(0xd6, 0x27, 0x28));
	assert_eq!("#1F77b4".parse::<Color>().unwrap(), Color::TAB_BLUE);
	assert_eq!(Color::TAB_BLUE.to_string(), "#1f77b4");
	insta::assert_snapshot!("#12345".parse::<Color>().unwrap_err().to_string(), @r###"invalid color "#12345""###);
}
