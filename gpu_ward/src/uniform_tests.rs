use super::*;

// ============================================================================
// UNIFORM TYPE
// ============================================================================

#[test]
fn test_glsl_names_round_trip() {
    for ty in UniformType::SUPPORTED {
        assert_eq!(UniformType::from_glsl_name(ty.glsl_name()), Some(ty));
    }
}

#[test]
fn test_glsl_aliases_and_unsupported_names() {
    assert_eq!(UniformType::from_glsl_name("mat4x4"), Some(UniformType::Mat4));
    assert_eq!(
        UniformType::from_glsl_name("sampler2D"),
        Some(UniformType::Unsupported(unsupported_code::SAMPLER_2D))
    );
    assert_eq!(UniformType::from_glsl_name("vec5"), None);
    assert_eq!(UniformType::from_glsl_name(""), None);
}

#[test]
fn test_component_counts() {
    assert_eq!(UniformType::Float.component_count(), 1);
    assert_eq!(UniformType::UVec3.component_count(), 3);
    assert_eq!(UniformType::Mat2.component_count(), 4);
    assert_eq!(UniformType::Mat3x2.component_count(), 6);
    assert_eq!(UniformType::Mat4x3.component_count(), 12);
    assert_eq!(UniformType::Mat4.component_count(), 16);
    assert_eq!(UniformType::Unsupported(0x8B56).component_count(), 0);
}

#[test]
fn test_scalar_kinds() {
    assert_eq!(UniformType::Mat2x4.scalar_kind(), Some(ScalarKind::Float));
    assert_eq!(UniformType::IVec2.scalar_kind(), Some(ScalarKind::Int));
    assert_eq!(UniformType::UInt.scalar_kind(), Some(ScalarKind::UInt));
    assert_eq!(UniformType::Unsupported(1).scalar_kind(), None);
    assert!(!UniformType::Unsupported(1).is_supported());
}

#[test]
fn test_uniform_type_display() {
    assert_eq!(UniformType::Vec3.to_string(), "vec3");
    assert_eq!(UniformType::Unsupported(0x8B5E).to_string(), "unsupported(0x8b5e)");
}

// ============================================================================
// UNIFORM VALUE
// ============================================================================

#[test]
fn test_zero_values_match_their_tag() {
    for ty in UniformType::SUPPORTED {
        let zero = UniformValue::zero(ty).unwrap();
        assert_eq!(zero.ty(), ty);
    }
    assert!(UniformValue::zero(UniformType::Unsupported(7)).is_none());
}

#[test]
fn test_scalars_are_column_major() {
    let m = Mat2::from_cols(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
    assert_eq!(UniformValue::Mat2(m).scalars(), Scalars::Float(vec![1.0, 2.0, 3.0, 4.0]));

    let m = Mat3x2::from_cols([Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Vec2::new(5.0, 6.0)]);
    assert_eq!(m.col(2), Vec2::new(5.0, 6.0));
    assert_eq!(
        UniformValue::Mat3x2(m).scalars(),
        Scalars::Float(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
    );
}

#[test]
fn test_from_scalars_rebuilds_value() {
    let v = UniformValue::from_f32s(UniformType::Vec3, &[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(v, UniformValue::Vec3(Vec3::new(1.0, 2.0, 3.0)));

    let v = UniformValue::from_i32s(UniformType::IVec2, &[-1, 5]).unwrap();
    assert_eq!(v, UniformValue::IVec2(IVec2::new(-1, 5)));

    let v = UniformValue::from_u32s(UniformType::UInt, &[9]).unwrap();
    assert_eq!(v, UniformValue::UInt(9));

    let data: Vec<f32> = (0..12).map(|i| i as f32).collect();
    let v = UniformValue::from_f32s(UniformType::Mat4x3, &data).unwrap();
    assert_eq!(v.scalars(), Scalars::Float(data));
}

#[test]
fn test_from_scalars_rejects_wrong_family_or_short_data() {
    assert!(UniformValue::from_f32s(UniformType::Int, &[1.0]).is_none());
    assert!(UniformValue::from_i32s(UniformType::Vec2, &[1, 2]).is_none());
    assert!(UniformValue::from_f32s(UniformType::Mat4, &[0.0; 15]).is_none());
    assert!(UniformValue::from_u32s(UniformType::UVec4, &[1, 2, 3]).is_none());
}

// ============================================================================
// UNIFORM SHAPE
// ============================================================================

#[test]
fn test_shape_tags_match_conversions() {
    assert_eq!(<f32 as UniformShape>::TYPE, UniformValue::from(1.0f32).ty());
    assert_eq!(<IVec4 as UniformShape>::TYPE, UniformValue::from(IVec4::ONE).ty());
    assert_eq!(<Mat2x4 as UniformShape>::TYPE, UniformValue::from(Mat2x4::default()).ty());
}

#[test]
fn test_shape_extraction() {
    let value = UniformValue::from(Vec4::new(0.1, 0.2, 0.3, 1.0));
    assert_eq!(Vec4::from_value(value), Some(Vec4::new(0.1, 0.2, 0.3, 1.0)));
    assert_eq!(Vec3::from_value(value), None);
    assert_eq!(u32::from_value(UniformValue::Int(3)), None);
}
