//! WGSL program reflection.
//!
//! Compiling a program means parsing and validating both stages with naga,
//! checking their entry points and then "linking" them: the uniform block
//! each stage declares at `@group(0) @binding(0)` must agree on every member
//! both stages name. The merged block gives every uniform name a byte range,
//! which is what a uniform location resolves to.

use crate::backend::{ShaderError, ShaderStage};

pub const VERTEX_ENTRY_POINT: &str = "vs_main";
pub const FRAGMENT_ENTRY_POINT: &str = "fs_main";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformField {
    pub name: String,
    pub offset: u32,
    pub size: u32,
}

impl UniformField {
    fn overlaps(&self, other: &UniformField) -> bool {
        self.offset < other.offset + other.size && other.offset < self.offset + self.size
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniformBlock {
    pub fields: Vec<UniformField>,
    pub size: u32,
}

impl UniformBlock {
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    fn merge(mut self, other: UniformBlock) -> Result<Self, ShaderError> {
        for field in other.fields {
            match self.fields.iter().find(|f| f.name == field.name) {
                Some(existing) if existing == &field => {}
                Some(existing) => {
                    return Err(ShaderError::Link {
                        log: format!(
                            "uniform `{}` is declared at {}..{} in the vertex stage but at {}..{} in the fragment stage",
                            field.name,
                            existing.offset,
                            existing.offset + existing.size,
                            field.offset,
                            field.offset + field.size
                        ),
                    });
                }
                None => {
                    if let Some(existing) = self.fields.iter().find(|f| f.overlaps(&field)) {
                        return Err(ShaderError::Link {
                            log: format!(
                                "uniform `{}` at {}..{} overlaps `{}` at {}..{} of the other stage",
                                field.name,
                                field.offset,
                                field.offset + field.size,
                                existing.name,
                                existing.offset,
                                existing.offset + existing.size
                            ),
                        });
                    }
                    self.fields.push(field);
                }
            }
        }
        self.size = self.size.max(other.size);
        Ok(self)
    }
}

/// Validated stage modules plus their merged uniform block.
#[derive(Debug)]
pub struct LinkedProgram {
    pub vertex: naga::Module,
    pub fragment: naga::Module,
    pub uniforms: UniformBlock,
}

pub fn link_program(vertex_source: &str, fragment_source: &str) -> Result<LinkedProgram, ShaderError> {
    let vertex = compile_stage(ShaderStage::Vertex, vertex_source)?;
    let fragment = compile_stage(ShaderStage::Fragment, fragment_source)?;

    require_entry_point(&vertex, naga::ShaderStage::Vertex, VERTEX_ENTRY_POINT)?;
    require_entry_point(&fragment, naga::ShaderStage::Fragment, FRAGMENT_ENTRY_POINT)?;

    let uniforms = uniform_block(&vertex)?.merge(uniform_block(&fragment)?)?;
    Ok(LinkedProgram {
        vertex,
        fragment,
        uniforms,
    })
}

fn compile_stage(stage: ShaderStage, source: &str) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compile {
        stage,
        log: e.emit_to_string(source),
    })?;
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| ShaderError::Compile {
            stage,
            log: format!("{e}"),
        })?;
    Ok(module)
}

fn require_entry_point(
    module: &naga::Module,
    stage: naga::ShaderStage,
    name: &str,
) -> Result<(), ShaderError> {
    module
        .entry_points
        .iter()
        .any(|ep| ep.stage == stage && ep.name == name)
        .then_some(())
        .ok_or_else(|| ShaderError::Link {
            log: format!("no {:?} entry point named `{}`", stage, name),
        })
}

fn uniform_block(module: &naga::Module) -> Result<UniformBlock, ShaderError> {
    let binding = Some(naga::ResourceBinding {
        group: 0,
        binding: 0,
    });
    let Some((_, global)) = module
        .global_variables
        .iter()
        .find(|(_, g)| g.space == naga::AddressSpace::Uniform && g.binding == binding)
    else {
        return Ok(UniformBlock::default());
    };
    match &module.types[global.ty].inner {
        naga::TypeInner::Struct { members, span } => Ok(UniformBlock {
            fields: members
                .iter()
                .filter_map(|m| {
                    m.name.as_ref().map(|name| UniformField {
                        name: name.clone(),
                        offset: m.offset,
                        size: module.types[m.ty].inner.size(module.to_ctx()),
                    })
                })
                .collect(),
            size: *span,
        }),
        _ => Err(ShaderError::Link {
            log: "the uniform at @group(0) @binding(0) must be a struct".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = r#"
struct Uniforms {
    transformation_matrix: mat4x4<f32>,
    light_position: vec3<f32>,
    shine_damper: f32,
};
@group(0) @binding(0) var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return uniforms.transformation_matrix * vec4<f32>(position, 1.0);
}
"#;

    const FRAGMENT: &str = r#"
struct Uniforms {
    transformation_matrix: mat4x4<f32>,
    light_position: vec3<f32>,
    shine_damper: f32,
};
@group(0) @binding(0) var<uniform> uniforms: Uniforms;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(uniforms.shine_damper, 0.0, 0.0, 1.0);
}
"#;

    #[test]
    fn reflects_member_offsets() {
        let program = link_program(VERTEX, FRAGMENT).unwrap();
        let fields: Vec<(&str, u32, u32)> = program
            .uniforms
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.offset, f.size))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("transformation_matrix", 0, 64),
                ("light_position", 64, 12),
                ("shine_damper", 76, 4),
            ]
        );
        assert_eq!(program.uniforms.size, 80);
        assert_eq!(program.uniforms.position("shine_damper"), Some(2));
        assert_eq!(program.uniforms.position("view_matrix"), None);
    }

    #[test]
    fn reports_compile_errors_per_stage() {
        let err = link_program(VERTEX, "fn fs_main( {").unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Compile {
                stage: ShaderStage::Fragment,
                ..
            }
        ));
    }

    #[test]
    fn missing_entry_point_fails_to_link() {
        let err = link_program(FRAGMENT, FRAGMENT).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }));
    }

    #[test]
    fn disagreeing_uniform_blocks_fail_to_link() {
        let fragment = r#"
struct Uniforms {
    shine_damper: f32,
};
@group(0) @binding(0) var<uniform> uniforms: Uniforms;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(uniforms.shine_damper, 0.0, 0.0, 1.0);
}
"#;
        let err = link_program(VERTEX, fragment).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }));
    }

    #[test]
    fn different_names_on_the_same_bytes_fail_to_link() {
        let fragment = r#"
struct Uniforms {
    reflectivity: f32,
};
@group(0) @binding(0) var<uniform> uniforms: Uniforms;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(uniforms.reflectivity, 0.0, 0.0, 1.0);
}
"#;
        let err = link_program(VERTEX, fragment).unwrap_err();
        match err {
            ShaderError::Link { log } => {
                assert!(log.contains("reflectivity"), "{}", log);
                assert!(log.contains("transformation_matrix"), "{}", log);
            }
            other => panic!("expected a link error, got {other:?}"),
        }
    }

    #[test]
    fn stage_may_extend_the_block_past_the_other() {
        let fragment = r#"
struct Uniforms {
    transformation_matrix: mat4x4<f32>,
    light_position: vec3<f32>,
    shine_damper: f32,
    reflectivity: f32,
};
@group(0) @binding(0) var<uniform> uniforms: Uniforms;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(uniforms.reflectivity, 0.0, 0.0, 1.0);
}
"#;
        let program = link_program(VERTEX, fragment).unwrap();
        let reflectivity = program.uniforms.position("reflectivity").unwrap();
        assert_eq!(program.uniforms.fields[reflectivity].offset, 80);
        assert_eq!(program.uniforms.size, 96);
    }

    #[test]
    fn merge_rejects_partial_overlap() {
        let field = |name: &str, offset, size| UniformField {
            name: name.to_string(),
            offset,
            size,
        };
        let vertex = UniformBlock {
            fields: vec![field("light_position", 0, 12)],
            size: 16,
        };
        let touching = UniformBlock {
            fields: vec![field("shine_damper", 12, 4)],
            size: 16,
        };
        let overlapping = UniformBlock {
            fields: vec![field("light_colour", 8, 12)],
            size: 32,
        };
        assert!(vertex.clone().merge(touching).is_ok());
        assert!(matches!(
            vertex.merge(overlapping),
            Err(ShaderError::Link { .. })
        ));
    }
}
