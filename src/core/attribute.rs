use std::fmt;
use std::str::SplitWhitespace;

use serde::Serialize;

use super::shared::NdVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeType {
	Position,
	TextureCoordinate,
	Normal,
}

impl AttributeType {
	/// Returns the number of components a value of this attribute contributes to
	/// an interleaved vertex.
	#[inline]
	pub const fn get_num_components(&self) -> usize {
		match self {
			Self::Position => 3,
			Self::TextureCoordinate => 2,
			Self::Normal => 3,
		}
	}

	/// Returns the line keyword that introduces this attribute in an obj file.
	#[inline]
	pub fn get_obj_keyword(&self) -> &'static str {
		match self {
			Self::Position => "v",
			Self::TextureCoordinate => "vt",
			Self::Normal => "vn",
		}
	}
}

impl fmt::Display for AttributeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Position => "position",
			Self::TextureCoordinate => "texture coordinate",
			Self::Normal => "normal",
		};
		f.write_str(name)
	}
}


/// Parses the first `N` fields as numbers. Further fields (e.g. the `w` of a
/// position) are ignored. The error is a human readable reason.
pub fn parse_components<const N: usize>(
	att_type: AttributeType,
	mut fields: SplitWhitespace<'_>,
) -> Result<NdVector<N, f64>, String> {
	let mut data = [0.0; N];
	for (i, component) in data.iter_mut().enumerate() {
		let field = fields.next().ok_or_else(|| format!(
			"'{}' needs {} components, found {}",
			att_type.get_obj_keyword(), N, i
		))?;
		*component = field.parse::<f64>()
			.map_err(|_| format!("invalid {} component '{}'", att_type, field))?;
	}
	Ok(NdVector::from(data))
}


/// An attribute line kept as written. Its fields are only interpreted once a
/// face refers to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
	line: usize,
	fields: String,
}

impl RawAttribute {
	/// `fields` is the text after the keyword.
	pub fn new(line: usize, fields: impl Into<String>) -> Self {
		Self { line, fields: fields.into() }
	}

	/// 1-based line number in the source file.
	pub fn get_line(&self) -> usize {
		self.line
	}

	pub fn parse<const N: usize>(&self, att_type: AttributeType) -> Result<NdVector<N, f64>, String> {
		parse_components::<N>(att_type, self.fields.split_whitespace())
	}
}


/// The attribute values of an obj file, each table in file order.
/// Tables are indexed 0-based, while obj files refer to them 1-based.
///
/// Positions are parsed while reading since they feed the extent; texture
/// coordinates and normals stay raw until interleaving.
#[derive(Debug, Clone, Default)]
pub struct AttributeTable {
	positions: Vec<NdVector<3, f64>>,
	tex_coords: Vec<RawAttribute>,
	normals: Vec<RawAttribute>,
}

impl AttributeTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_position(&mut self, value: NdVector<3, f64>) {
		self.positions.push(value);
	}

	pub fn push_tex_coord(&mut self, value: RawAttribute) {
		self.tex_coords.push(value);
	}

	pub fn push_normal(&mut self, value: RawAttribute) {
		self.normals.push(value);
	}

	pub fn get_positions(&self) -> &[NdVector<3, f64>] {
		&self.positions
	}

	pub fn get_tex_coords(&self) -> &[RawAttribute] {
		&self.tex_coords
	}

	pub fn get_normals(&self) -> &[RawAttribute] {
		&self.normals
	}

	pub fn len(&self, att_type: AttributeType) -> usize {
		match att_type {
			AttributeType::Position => self.positions.len(),
			AttributeType::TextureCoordinate => self.tex_coords.len(),
			AttributeType::Normal => self.normals.len(),
		}
	}
}
