//! Variable metadata extraction.

use netcdf::types::{FloatType, IntType, NcVariableType};
use netcdf::AttributeValue;

/// Scalar storage type of a NetCDF variable, named the way the raster
/// extension spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl DataType {
    pub fn from_nc_type(nc_type: &NcVariableType) -> Option<Self> {
        match nc_type {
            NcVariableType::Int(IntType::I8) => Some(DataType::Int8),
            NcVariableType::Int(IntType::U8) => Some(DataType::UInt8),
            NcVariableType::Int(IntType::I16) => Some(DataType::Int16),
            NcVariableType::Int(IntType::U16) => Some(DataType::UInt16),
            NcVariableType::Int(IntType::I32) => Some(DataType::Int32),
            NcVariableType::Int(IntType::U32) => Some(DataType::UInt32),
            NcVariableType::Int(IntType::I64) => Some(DataType::Int64),
            NcVariableType::Int(IntType::U64) => Some(DataType::UInt64),
            NcVariableType::Float(FloatType::F32) => Some(DataType::Float32),
            NcVariableType::Float(FloatType::F64) => Some(DataType::Float64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int8 => "int8",
            DataType::UInt8 => "uint8",
            DataType::Int16 => "int16",
            DataType::UInt16 => "uint16",
            DataType::Int32 => "int32",
            DataType::UInt32 => "uint32",
            DataType::Int64 => "int64",
            DataType::UInt64 => "uint64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
        }
    }

    pub fn is_floating_point(&self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata extracted from one data variable.
#[derive(Debug, Clone)]
pub struct VariableMetadata {
    pub name: String,
    pub long_name: Option<String>,
    pub units: Option<String>,
    pub data_type: Option<DataType>,
    pub fill_value: Option<f64>,
    pub dimensions: Vec<String>,
    pub shape: Vec<usize>,
}

impl VariableMetadata {
    pub fn from_variable(var: &netcdf::Variable) -> Self {
        Self {
            name: var.name(),
            long_name: str_attr(var, "long_name"),
            units: str_attr(var, "units"),
            data_type: DataType::from_nc_type(&var.vartype()),
            fill_value: f64_attr(var, "_FillValue"),
            dimensions: var.dimensions().iter().map(|d| d.name()).collect(),
            shape: var.dimensions().iter().map(|d| d.len()).collect(),
        }
    }

    /// Units with NetCDF underscores replaced by spaces, for human-facing
    /// metadata (`10^18_joules` reads as `10^18 joules`).
    pub fn display_units(&self) -> Option<String> {
        self.units.as_ref().map(|u| u.replace('_', " "))
    }
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

pub(crate) fn str_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

pub(crate) fn f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let value = var.attribute_value(name)?.ok()?;
    f64::try_from(value).ok()
}
