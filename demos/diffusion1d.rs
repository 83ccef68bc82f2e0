use std::sync::Arc;

use clap::Parser;
use fivol::field::CellField;
use fivol::mesh::{CartesianMesh, Mesh};
use fivol::select;

/// Explicit diffusion of a step profile on a uniform 1D mesh, driven
/// entirely by the field core: the diffusive flux through each face is the
/// normal component of the face gradient, and the previous time level is
/// read back through the field's old snapshot.
#[derive(Debug, Parser)]
struct Opts {
    #[clap(short = 'n', long, default_value = "50")]
    num_cells: usize,

    #[clap(short = 'd', long, default_value = "1.0")]
    diffusivity: f64,

    #[clap(short = 's', long, default_value = "400")]
    num_steps: usize,

    /// Run the explicitly indexed kernel path instead of the vectorized one
    #[clap(long)]
    kernels: bool,
}

#[derive(serde::Serialize)]
struct State {
    iteration: u64,
    time: f64,
    phi: CellField<CartesianMesh>,
}

// ============================================================================
fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let opts = Opts::parse();
    select::init_from(if opts.kernels {
        vec![select::KERNEL_FLAG]
    } else {
        vec![]
    });

    let dx = 1.0 / opts.num_cells as f64;
    let dt = 0.25 * dx * dx / opts.diffusivity;
    let mesh = Arc::new(CartesianMesh::line(opts.num_cells, dx));

    let step_profile: Vec<f64> = (0..mesh.num_cells())
        .map(|cell| if mesh.cell_center(cell).0 < 0.5 { 1.0 } else { 0.0 })
        .collect();
    let mut phi = CellField::new(mesh.clone(), "phi", step_profile.into(), true).unwrap();

    let mut state = State {
        iteration: 0,
        time: 0.0,
        phi: phi.copy(),
    };

    while state.iteration < opts.num_steps as u64 {
        phi.commit_old();

        // Boundary faces carry no normal gradient, so the boundaries are
        // no-flux and the profile's mean is conserved.
        let face_grad = phi.old().face_grad();
        let next: Vec<f64> = (0..mesh.num_cells())
            .map(|cell| {
                let divergence: f64 = mesh
                    .cell_faces(cell)
                    .iter()
                    .map(|&face| {
                        mesh.face_orientation(face, cell)
                            * mesh.face_area(face)
                            * mesh.face_normal(face).dot(face_grad[face])
                    })
                    .sum();
                phi.old().values()[cell]
                    + opts.diffusivity * dt * divergence / mesh.cell_volume(cell)
            })
            .collect();
        phi.set_value(next, &[]).unwrap();

        state.iteration += 1;
        state.time += dt;

        if state.iteration % 100 == 0 {
            let mean = phi.values().iter().sum::<f64>() / phi.values().len() as f64;
            println!("[{}] t={:.4} mean={:.6}", state.iteration, state.time, mean);
        }
    }
    state.phi = phi;

    let file = std::fs::File::create("diffusion1d.cbor").unwrap();
    let mut buffer = std::io::BufWriter::new(file);
    ciborium::ser::into_writer(&state, &mut buffer).unwrap();
    log::info!("final state written to diffusion1d.cbor");
}
