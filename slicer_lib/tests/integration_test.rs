use nalgebra::{point, Matrix4};
use slicer_lib::{
    config::DatasetConfig,
    session::{InputFrame, Session},
    slices::{Axis, DrawOrder},
    test_helpers::{self, ScratchDir},
    volumetric::VolumeStore,
    SlicerError,
};

fn dataset(count: usize) -> (ScratchDir, DatasetConfig) {
    let dir = ScratchDir::new().unwrap();
    let config = test_helpers::small_config(dir.path(), count);
    let volumes = test_helpers::dataset_volumes(&config);
    test_helpers::write_dataset(dir.path(), &config, &volumes).unwrap();
    (dir, config)
}

#[test]
fn load_matches_in_memory_build() {
    let (_dir, config) = dataset(3);

    let loaded = VolumeStore::from_config(&config).unwrap();
    let built = VolumeStore::from_volumes(
        test_helpers::dataset_volumes(&config),
        config.layout(),
        config.transfer_function,
    )
    .unwrap();

    assert_eq!(loaded.volume_count(), 3);
    assert_eq!(loaded.slices().total_bytes(), config.texture_bytes().unwrap());
    assert_eq!(loaded.slices().as_bytes(), built.slices().as_bytes());
    for index in 0..3 {
        assert_eq!(loaded.volume(index), built.volume(index));
    }
}

#[test]
fn loading_twice_is_bit_identical() {
    let (_dir, config) = dataset(2);

    let first = VolumeStore::from_config(&config).unwrap();
    let second = VolumeStore::from_config(&config).unwrap();
    assert_eq!(first.slices().as_bytes(), second.slices().as_bytes());
}

#[test]
fn missing_file_fails_whole_load() {
    let (dir, config) = dataset(3);
    std::fs::remove_file(dir.path().join(config.file_name(1))).unwrap();

    let err = VolumeStore::from_config(&config).unwrap_err();
    match err {
        SlicerError::OpenFile { file, dir: err_dir, .. } => {
            assert_eq!(file, "test.1.img");
            assert_eq!(err_dir, dir.path());
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn short_file_fails_whole_load() {
    let (dir, config) = dataset(3);
    std::fs::write(dir.path().join(config.file_name(2)), [1, 2, 3]).unwrap();

    let err = VolumeStore::from_config(&config).unwrap_err();
    assert!(matches!(err, SlicerError::ShortRead { actual: 3, .. }));
}

#[test]
fn missing_data_path() {
    let (_dir, mut config) = dataset(1);
    config.data_path = None;

    let err = VolumeStore::from_config(&config).unwrap_err();
    assert!(matches!(err, SlicerError::MissingConfig { key: "data_path" }));
}

#[test]
fn config_file_drives_load() {
    let (dir, config) = dataset(2);
    let config_path = dir.path().join("dataset.toml");
    std::fs::write(&config_path, toml_of(&config)).unwrap();

    let from_file = DatasetConfig::from_file(&config_path).unwrap();
    assert_eq!(from_file, config);
    assert!(VolumeStore::from_config(&from_file).is_ok());
}

fn toml_of(config: &DatasetConfig) -> String {
    let dir = config.data_path.as_ref().unwrap().display();
    format!(
        "data_path = {dir:?}\nbase_name = \"{}\"\nextension = \"{}\"\ndims = [{}, {}, {}]\n\
         volume_count = {}\nslice_count = {}\nslice_width = {}\nslice_height = {}\n",
        config.base_name,
        config.extension,
        config.dims[0],
        config.dims[1],
        config.dims[2],
        config.volume_count,
        config.slice_count,
        config.slice_width,
        config.slice_height,
    )
}

#[test]
fn frames_follow_session() {
    let (_dir, config) = dataset(3);
    let store = VolumeStore::from_config(&config).unwrap();
    let mut session = Session::master(store.volume_count()).unwrap();

    let press = InputFrame {
        buttons: [true, false, false],
        ..Default::default()
    };
    let release = InputFrame::default();

    // three presses wrap back to the first volume
    let mut visited = vec![session.current_volume()];
    for _ in 0..3 {
        session.pre_exchange(&press);
        session.pre_exchange(&press);
        session.pre_exchange(&release);
        visited.push(session.current_volume());
    }
    assert_eq!(visited, [0, 1, 2, 0]);

    let eye = session.eye_position(&point![0.0, 0.0, -5.0]);
    let plan = store.frame_plan(session.current_volume(), &eye).unwrap();
    assert_eq!(plan.axis, Axis::Z);
    assert_eq!(plan.order, DrawOrder::Descending);
    assert_eq!(plan.slice_count(), config.slice_count);
    for placed in &plan.slices {
        assert_eq!(placed.image.as_bytes().len(), config.layout().slice_bytes());
    }
    assert_eq!(*session.world(), Matrix4::identity());
}

#[test]
fn every_axis_reachable() {
    let (_dir, config) = dataset(1);
    let store = VolumeStore::from_config(&config).unwrap();

    for axis in Axis::ALL {
        let plan = store
            .frame_plan(0, &test_helpers::eye_on_axis(axis, 4.0))
            .unwrap();
        assert_eq!(plan.axis, axis);
        assert_eq!(plan.order, DrawOrder::Ascending);
        let first = store.slice(0, axis, 0).unwrap();
        assert_eq!(plan.slices[0].image.as_bytes(), first.as_bytes());
    }
}
