//! For canonically written faces (no zero padding, no repeated spelling of the
//! same triple), the catalog must agree with tobj's single-index loading.

use obj_interleave::prelude::*;

const FILE_NAMES: [&str; 3] = ["square", "cube_quads", "pyramid"];

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn agrees_with_tobj() {
    let opts = tobj::LoadOptions {
        single_index: true,
        triangulate: false,
        ..Default::default()
    };

    for name in FILE_NAMES {
        let path = format!("tests/data/{}.obj", name);
        let (models, _materials) = tobj::load_obj(&path, &opts).unwrap();
        assert_eq!(models.len(), 1, "{}", name);
        let reference = &models[0].mesh;

        let src = std::fs::read_to_string(&path).unwrap();
        let mesh = interleave_str(&src).unwrap();

        assert_eq!(mesh.get_catalog().len(), reference.positions.len() / 3, "{}", name);
        let indices = mesh.get_indices().iter().map(|&i| usize::from(i) as u32).collect::<Vec<_>>();
        assert_eq!(indices, reference.indices, "{}", name);

        for (i, block) in mesh.get_vertices().chunks(InterleavedMesh::STRIDE).enumerate() {
            let uv = &reference.texcoords[2 * i..2 * i + 2];
            let normal = &reference.normals[3 * i..3 * i + 3];
            let position = &reference.positions[3 * i..3 * i + 3];
            let expected = uv.iter().chain(normal).chain(position).map(|&x| f64::from(x));
            for (got, want) in block.iter().zip(expected) {
                assert!(close(*got, want), "{}: vertex {}: {} != {}", name, i, got, want);
            }
        }
    }
}
