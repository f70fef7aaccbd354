//! Uniform type tags and the tagged uniform value
//!
//! One [`UniformValue`] variant per shape the binding surface supports. The
//! program checks a value's tag against the reflected declaration before any
//! device call, so a single validated set/get path serves every shape.

use std::fmt;
use bytemuck::{Pod, Zeroable};
use glam::{IVec2, IVec3, IVec4, Mat2, Mat3, Mat4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4};

// ============================================================================
// UniformType
// ============================================================================

/// Declared type of an active uniform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Int,
    IVec2,
    IVec3,
    IVec4,
    UInt,
    UVec2,
    UVec3,
    UVec4,
    Mat2,
    Mat3,
    Mat4,
    Mat2x3,
    Mat3x2,
    Mat2x4,
    Mat4x2,
    Mat3x4,
    Mat4x3,
    /// Reflected type the binding surface does not cover (samplers, images,
    /// booleans, doubles). Carries the device type code.
    Unsupported(u32),
}

/// Scalar family of a uniform type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Float,
    Int,
    UInt,
}

/// Device type codes of common declarations without a [`UniformValue`] shape
pub mod unsupported_code {
    pub const BOOL: u32 = 0x8B56;
    pub const SAMPLER_2D: u32 = 0x8B5E;
    pub const SAMPLER_3D: u32 = 0x8B5F;
    pub const SAMPLER_CUBE: u32 = 0x8B60;
    pub const IMAGE_2D: u32 = 0x904D;
    pub const DOUBLE: u32 = 0x140A;
}

impl UniformType {
    /// Every supported tag
    pub const SUPPORTED: [UniformType; 21] = [
        UniformType::Float, UniformType::Vec2, UniformType::Vec3, UniformType::Vec4,
        UniformType::Int, UniformType::IVec2, UniformType::IVec3, UniformType::IVec4,
        UniformType::UInt, UniformType::UVec2, UniformType::UVec3, UniformType::UVec4,
        UniformType::Mat2, UniformType::Mat3, UniformType::Mat4,
        UniformType::Mat2x3, UniformType::Mat3x2, UniformType::Mat2x4,
        UniformType::Mat4x2, UniformType::Mat3x4, UniformType::Mat4x3,
    ];

    /// GLSL spelling of the type
    pub fn glsl_name(&self) -> &'static str {
        match self {
            UniformType::Float => "float",
            UniformType::Vec2 => "vec2",
            UniformType::Vec3 => "vec3",
            UniformType::Vec4 => "vec4",
            UniformType::Int => "int",
            UniformType::IVec2 => "ivec2",
            UniformType::IVec3 => "ivec3",
            UniformType::IVec4 => "ivec4",
            UniformType::UInt => "uint",
            UniformType::UVec2 => "uvec2",
            UniformType::UVec3 => "uvec3",
            UniformType::UVec4 => "uvec4",
            UniformType::Mat2 => "mat2",
            UniformType::Mat3 => "mat3",
            UniformType::Mat4 => "mat4",
            UniformType::Mat2x3 => "mat2x3",
            UniformType::Mat3x2 => "mat3x2",
            UniformType::Mat2x4 => "mat2x4",
            UniformType::Mat4x2 => "mat4x2",
            UniformType::Mat3x4 => "mat3x4",
            UniformType::Mat4x3 => "mat4x3",
            UniformType::Unsupported(_) => "unsupported",
        }
    }

    /// Parse a GLSL type name. Known types without a value shape map to
    /// `Unsupported` with their device code; unknown names give `None`.
    pub fn from_glsl_name(name: &str) -> Option<Self> {
        if let Some(ty) = Self::SUPPORTED.iter().find(|t| t.glsl_name() == name) {
            return Some(*ty);
        }
        let ty = match name {
            "mat2x2" => UniformType::Mat2,
            "mat3x3" => UniformType::Mat3,
            "mat4x4" => UniformType::Mat4,
            "bool" => UniformType::Unsupported(unsupported_code::BOOL),
            "double" => UniformType::Unsupported(unsupported_code::DOUBLE),
            "sampler2D" => UniformType::Unsupported(unsupported_code::SAMPLER_2D),
            "sampler3D" => UniformType::Unsupported(unsupported_code::SAMPLER_3D),
            "samplerCube" => UniformType::Unsupported(unsupported_code::SAMPLER_CUBE),
            "image2D" => UniformType::Unsupported(unsupported_code::IMAGE_2D),
            _ => return None,
        };
        Some(ty)
    }

    /// Number of scalar components of one element (0 for `Unsupported`)
    pub fn component_count(&self) -> usize {
        match self {
            UniformType::Float | UniformType::Int | UniformType::UInt => 1,
            UniformType::Vec2 | UniformType::IVec2 | UniformType::UVec2 => 2,
            UniformType::Vec3 | UniformType::IVec3 | UniformType::UVec3 => 3,
            UniformType::Vec4 | UniformType::IVec4 | UniformType::UVec4 | UniformType::Mat2 => 4,
            UniformType::Mat2x3 | UniformType::Mat3x2 => 6,
            UniformType::Mat2x4 | UniformType::Mat4x2 => 8,
            UniformType::Mat3 => 9,
            UniformType::Mat3x4 | UniformType::Mat4x3 => 12,
            UniformType::Mat4 => 16,
            UniformType::Unsupported(_) => 0,
        }
    }

    /// Scalar family, `None` for `Unsupported`
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            UniformType::Int | UniformType::IVec2 | UniformType::IVec3 | UniformType::IVec4 => Some(ScalarKind::Int),
            UniformType::UInt | UniformType::UVec2 | UniformType::UVec3 | UniformType::UVec4 => Some(ScalarKind::UInt),
            UniformType::Unsupported(_) => None,
            _ => Some(ScalarKind::Float),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, UniformType::Unsupported(_))
    }
}

impl fmt::Display for UniformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformType::Unsupported(code) => write!(f, "unsupported({:#06x})", code),
            other => f.write_str(other.glsl_name()),
        }
    }
}

// ============================================================================
// Non-square matrices
// ============================================================================

macro_rules! column_major_matrix {
    ($(#[$doc:meta])* $name:ident, $cols:literal, $col_ty:ident, $rows:literal) => {
        $(#[$doc])*
        #[repr(C)]
        #[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
        pub struct $name(pub [f32; $cols * $rows]);

        impl $name {
            /// Build from columns
            pub fn from_cols(cols: [$col_ty; $cols]) -> Self {
                let mut data = [0.0; $cols * $rows];
                for (c, col) in cols.iter().enumerate() {
                    data[c * $rows..(c + 1) * $rows].copy_from_slice(&col.to_array());
                }
                Self(data)
            }

            /// Column `index` (panics if out of range)
            pub fn col(&self, index: usize) -> $col_ty {
                let mut col = [0.0; $rows];
                col.copy_from_slice(&self.0[index * $rows..(index + 1) * $rows]);
                $col_ty::from_array(col)
            }
        }
    };
}

column_major_matrix!(
    /// 2 columns of 3 rows, column-major
    Mat2x3, 2, Vec3, 3
);
column_major_matrix!(
    /// 3 columns of 2 rows, column-major
    Mat3x2, 3, Vec2, 2
);
column_major_matrix!(
    /// 2 columns of 4 rows, column-major
    Mat2x4, 2, Vec4, 4
);
column_major_matrix!(
    /// 4 columns of 2 rows, column-major
    Mat4x2, 4, Vec2, 2
);
column_major_matrix!(
    /// 3 columns of 4 rows, column-major
    Mat3x4, 3, Vec4, 4
);
column_major_matrix!(
    /// 4 columns of 3 rows, column-major
    Mat4x3, 4, Vec3, 3
);

// ============================================================================
// UniformValue
// ============================================================================

/// One uniform element, tagged with its shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Int(i32),
    IVec2(IVec2),
    IVec3(IVec3),
    IVec4(IVec4),
    UInt(u32),
    UVec2(UVec2),
    UVec3(UVec3),
    UVec4(UVec4),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
    Mat2x3(Mat2x3),
    Mat3x2(Mat3x2),
    Mat2x4(Mat2x4),
    Mat4x2(Mat4x2),
    Mat3x4(Mat3x4),
    Mat4x3(Mat4x3),
}

/// Flattened scalar components of a value, column-major for matrices
#[derive(Debug, Clone, PartialEq)]
pub enum Scalars {
    Float(Vec<f32>),
    Int(Vec<i32>),
    UInt(Vec<u32>),
}

impl UniformValue {
    /// Type tag of this value
    pub fn ty(&self) -> UniformType {
        match self {
            UniformValue::Float(_) => UniformType::Float,
            UniformValue::Vec2(_) => UniformType::Vec2,
            UniformValue::Vec3(_) => UniformType::Vec3,
            UniformValue::Vec4(_) => UniformType::Vec4,
            UniformValue::Int(_) => UniformType::Int,
            UniformValue::IVec2(_) => UniformType::IVec2,
            UniformValue::IVec3(_) => UniformType::IVec3,
            UniformValue::IVec4(_) => UniformType::IVec4,
            UniformValue::UInt(_) => UniformType::UInt,
            UniformValue::UVec2(_) => UniformType::UVec2,
            UniformValue::UVec3(_) => UniformType::UVec3,
            UniformValue::UVec4(_) => UniformType::UVec4,
            UniformValue::Mat2(_) => UniformType::Mat2,
            UniformValue::Mat3(_) => UniformType::Mat3,
            UniformValue::Mat4(_) => UniformType::Mat4,
            UniformValue::Mat2x3(_) => UniformType::Mat2x3,
            UniformValue::Mat3x2(_) => UniformType::Mat3x2,
            UniformValue::Mat2x4(_) => UniformType::Mat2x4,
            UniformValue::Mat4x2(_) => UniformType::Mat4x2,
            UniformValue::Mat3x4(_) => UniformType::Mat3x4,
            UniformValue::Mat4x3(_) => UniformType::Mat4x3,
        }
    }

    /// All-zero value of `ty`, `None` for `Unsupported`
    pub fn zero(ty: UniformType) -> Option<Self> {
        match ty.scalar_kind()? {
            ScalarKind::Float => Self::from_f32s(ty, &[0.0; 16]),
            ScalarKind::Int => Self::from_i32s(ty, &[0; 4]),
            ScalarKind::UInt => Self::from_u32s(ty, &[0; 4]),
        }
    }

    /// Flatten into scalar components
    pub fn scalars(&self) -> Scalars {
        match *self {
            UniformValue::Float(v) => Scalars::Float(vec![v]),
            UniformValue::Vec2(v) => Scalars::Float(v.to_array().to_vec()),
            UniformValue::Vec3(v) => Scalars::Float(v.to_array().to_vec()),
            UniformValue::Vec4(v) => Scalars::Float(v.to_array().to_vec()),
            UniformValue::Int(v) => Scalars::Int(vec![v]),
            UniformValue::IVec2(v) => Scalars::Int(v.to_array().to_vec()),
            UniformValue::IVec3(v) => Scalars::Int(v.to_array().to_vec()),
            UniformValue::IVec4(v) => Scalars::Int(v.to_array().to_vec()),
            UniformValue::UInt(v) => Scalars::UInt(vec![v]),
            UniformValue::UVec2(v) => Scalars::UInt(v.to_array().to_vec()),
            UniformValue::UVec3(v) => Scalars::UInt(v.to_array().to_vec()),
            UniformValue::UVec4(v) => Scalars::UInt(v.to_array().to_vec()),
            UniformValue::Mat2(m) => Scalars::Float(m.to_cols_array().to_vec()),
            UniformValue::Mat3(m) => Scalars::Float(m.to_cols_array().to_vec()),
            UniformValue::Mat4(m) => Scalars::Float(m.to_cols_array().to_vec()),
            UniformValue::Mat2x3(m) => Scalars::Float(m.0.to_vec()),
            UniformValue::Mat3x2(m) => Scalars::Float(m.0.to_vec()),
            UniformValue::Mat2x4(m) => Scalars::Float(m.0.to_vec()),
            UniformValue::Mat4x2(m) => Scalars::Float(m.0.to_vec()),
            UniformValue::Mat3x4(m) => Scalars::Float(m.0.to_vec()),
            UniformValue::Mat4x3(m) => Scalars::Float(m.0.to_vec()),
        }
    }

    /// Rebuild a float-family value from its components
    ///
    /// Returns `None` if `ty` is not float-family or `data` is too short.
    pub fn from_f32s(ty: UniformType, data: &[f32]) -> Option<Self> {
        if ty.scalar_kind() != Some(ScalarKind::Float) || data.len() < ty.component_count() {
            return None;
        }
        let value = match ty {
            UniformType::Float => UniformValue::Float(data[0]),
            UniformType::Vec2 => UniformValue::Vec2(Vec2::from_slice(data)),
            UniformType::Vec3 => UniformValue::Vec3(Vec3::from_slice(data)),
            UniformType::Vec4 => UniformValue::Vec4(Vec4::from_slice(data)),
            UniformType::Mat2 => UniformValue::Mat2(Mat2::from_cols_slice(data)),
            UniformType::Mat3 => UniformValue::Mat3(Mat3::from_cols_slice(data)),
            UniformType::Mat4 => UniformValue::Mat4(Mat4::from_cols_slice(data)),
            UniformType::Mat2x3 => UniformValue::Mat2x3(Mat2x3(array_from(data))),
            UniformType::Mat3x2 => UniformValue::Mat3x2(Mat3x2(array_from(data))),
            UniformType::Mat2x4 => UniformValue::Mat2x4(Mat2x4(array_from(data))),
            UniformType::Mat4x2 => UniformValue::Mat4x2(Mat4x2(array_from(data))),
            UniformType::Mat3x4 => UniformValue::Mat3x4(Mat3x4(array_from(data))),
            UniformType::Mat4x3 => UniformValue::Mat4x3(Mat4x3(array_from(data))),
            _ => return None,
        };
        Some(value)
    }

    /// Rebuild a signed-integer value from its components
    pub fn from_i32s(ty: UniformType, data: &[i32]) -> Option<Self> {
        if data.len() < ty.component_count() {
            return None;
        }
        let value = match ty {
            UniformType::Int => UniformValue::Int(data[0]),
            UniformType::IVec2 => UniformValue::IVec2(IVec2::from_slice(data)),
            UniformType::IVec3 => UniformValue::IVec3(IVec3::from_slice(data)),
            UniformType::IVec4 => UniformValue::IVec4(IVec4::from_slice(data)),
            _ => return None,
        };
        Some(value)
    }

    /// Rebuild an unsigned-integer value from its components
    pub fn from_u32s(ty: UniformType, data: &[u32]) -> Option<Self> {
        if data.len() < ty.component_count() {
            return None;
        }
        let value = match ty {
            UniformType::UInt => UniformValue::UInt(data[0]),
            UniformType::UVec2 => UniformValue::UVec2(UVec2::from_slice(data)),
            UniformType::UVec3 => UniformValue::UVec3(UVec3::from_slice(data)),
            UniformType::UVec4 => UniformValue::UVec4(UVec4::from_slice(data)),
            _ => return None,
        };
        Some(value)
    }
}

fn array_from<const N: usize>(data: &[f32]) -> [f32; N] {
    let mut out = [0.0; N];
    out.copy_from_slice(&data[..N]);
    out
}

// ============================================================================
// UniformShape
// ============================================================================

/// Rust type carried by one [`UniformValue`] variant
pub trait UniformShape: Sized + Into<UniformValue> {
    /// Tag of the variant carrying this type
    const TYPE: UniformType;

    /// Extract from a value of the matching variant
    fn from_value(value: UniformValue) -> Option<Self>;
}

macro_rules! uniform_shape {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for UniformValue {
                fn from(value: $ty) -> Self {
                    UniformValue::$variant(value)
                }
            }

            impl UniformShape for $ty {
                const TYPE: UniformType = UniformType::$variant;

                fn from_value(value: UniformValue) -> Option<Self> {
                    match value {
                        UniformValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

uniform_shape! {
    f32 => Float,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    i32 => Int,
    IVec2 => IVec2,
    IVec3 => IVec3,
    IVec4 => IVec4,
    u32 => UInt,
    UVec2 => UVec2,
    UVec3 => UVec3,
    UVec4 => UVec4,
    Mat2 => Mat2,
    Mat3 => Mat3,
    Mat4 => Mat4,
    Mat2x3 => Mat2x3,
    Mat3x2 => Mat3x2,
    Mat2x4 => Mat2x4,
    Mat4x2 => Mat4x2,
    Mat3x4 => Mat3x4,
    Mat4x3 => Mat4x3,
}

#[cfg(test)]
#[path = "uniform_tests.rs"]
mod tests;
