use std::fs;

use approx::assert_relative_eq;
use camino::{Utf8Path, Utf8PathBuf};
use orbit_scene::{
    pipeline::{ScenePipeline, ATTRIBUTE_TABLE_PATH, COLOR_TABLE_PATH},
    Scene, SceneError, SceneParams,
};
use tempfile::TempDir;

const ERIS_TABLE: &str = "\
*******************************************************************************
JDTDB, Calendar Date (TDB), X, Y, Z
$$SOE
2459000.5, A.D. 2020-May-31 00:00:00.0000, 100.0, 200.0, 300.0
2459001.5, A.D. 2020-Jun-01 00:00:00.0000, 110.0, 210.0, 310.0
2459002.5, A.D. 2020-Jun-02 00:00:00.0000, 120.0, 220.0, 320.0
$$EOE
";

fn write(root: &Utf8Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn data_dir() -> (TempDir, Utf8PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8Path::from_path(tmp.path()).unwrap().to_path_buf();

    write(&root, "tnos/Eris.csv", ERIS_TABLE);
    write(
        &root,
        "tnos/Sedna.csv",
        "2459000.75 1 2 0.0 0.0 0.0\n2459001.75 1 2 10.0 10.0 10.0\n",
    );
    write(&root, "tnos/Empty.csv", "no numbers in here\n");
    write(&root, "moons/Triton.csv", "2459002.5 5.0 6.0 7.0\n");
    for i in 0..10 {
        write(
            &root,
            &format!("asteroids/ast{i:02}.csv"),
            &format!("2459000.5 {i}.0 0.0 0.0\n2459002.5 {i}.5 1.0 1.0\n"),
        );
    }
    write(
        &root,
        ATTRIBUTE_TABLE_PATH,
        "# id name year desig a e i D\n136199 Eris 2003 UB313 67.8 0.44 44.0 2326.0\n",
    );
    write(
        &root,
        COLOR_TABLE_PATH,
        "category,color\ntnos,#ff0000\nasteroids,#00ff00\n",
    );

    (tmp, root)
}

fn run(root: &Utf8Path, params: SceneParams) -> Scene {
    ScenePipeline::from_data_dir(root, params).run().unwrap()
}

#[test]
fn test_full_pipeline() {
    let (_tmp, root) = data_dir();
    let scene = run(&root, SceneParams::new());

    assert!(scene.is_aligned());
    assert_eq!(
        scene.times_jd,
        vec![2459000.5, 2459000.75, 2459001.5, 2459001.75, 2459002.5]
    );
    assert_eq!(scene.metadata.time_count, 5);
    assert_eq!(scene.metadata.units, "km (assumed)");

    // Empty.csv dropped, Triton pruned (one valid sample)
    let ids: Vec<&str> = scene.objects.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids.len(), 12);
    assert_eq!(ids[0], "ast00");
    assert!(!ids.contains(&"Empty"));
    assert!(!ids.contains(&"Triton"));

    let eris = scene.objects.iter().find(|o| o.id == "Eris").unwrap();
    assert_eq!(eris.category, "tnos");
    assert_eq!(eris.color, "#ff0000");
    assert_eq!(eris.diameter_km, Some(67.8));
    let elements = eris.elements.unwrap();
    assert_eq!((elements.a_au, elements.e, elements.i_deg), (67.8, 0.44, 44.0));
    assert_eq!(eris.x[0], Some(100.0));
    assert_relative_eq!(eris.x[1].unwrap(), 102.5, epsilon = 1e-9);
    assert_eq!(eris.z[4], Some(320.0));

    let sedna = scene.objects.iter().find(|o| o.id == "Sedna").unwrap();
    assert_eq!(sedna.x[0], None);
    assert_eq!(sedna.x[4], None);
    assert_eq!(sedna.diameter_km, None);
    assert_eq!(sedna.elements, None);
}

#[test]
fn test_grid_cap_and_subsampling() {
    let (_tmp, root) = data_dir();
    let params = SceneParams::builder()
        .max_time_points(3)
        .subsample("asteroids", 0.3)
        .seed(123)
        .build()
        .unwrap();

    let first = run(&root, params.clone());
    let second = run(&root, params);

    assert_eq!(first, second);
    assert_eq!(first.times_jd, vec![2459000.5, 2459001.5, 2459002.5]);
    assert!(first.is_aligned());
    assert_eq!(
        first
            .objects
            .iter()
            .filter(|o| o.category == "asteroids")
            .count(),
        3
    );
}

#[test]
fn test_missing_side_tables_degrade() {
    let (_tmp, root) = data_dir();
    fs::remove_dir_all(root.join("diameters")).unwrap();
    fs::remove_dir_all(root.join("plotting_functions")).unwrap();

    let scene = run(&root, SceneParams::new());
    assert!(scene.objects.iter().all(|o| o.diameter_km.is_none()));
    assert!(scene.objects.iter().all(|o| o.color == "#CCCCCC"));
}

#[test]
fn test_unreadable_side_tables_degrade() {
    let (_tmp, root) = data_dir();
    // directories exist but cannot be read as tables
    let scene = ScenePipeline::from_data_dir(&root, SceneParams::new())
        .with_attribute_table(&root.join("tnos"))
        .with_color_table(&root.join("moons"))
        .run()
        .unwrap();

    assert_eq!(scene.objects.len(), 12);
    assert!(scene.objects.iter().all(|o| o.diameter_km.is_none()));
    assert!(scene.objects.iter().all(|o| o.elements.is_none()));
    assert!(scene.objects.iter().all(|o| o.color == "#CCCCCC"));
}

#[test]
fn test_nothing_to_do() {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8Path::from_path(tmp.path()).unwrap();
    write(root, "tnos/Empty.csv", "");

    let err = ScenePipeline::from_data_dir(root, SceneParams::new())
        .run()
        .unwrap_err();
    assert_eq!(err, SceneError::NoObjectsParsed);
}

#[test]
fn test_write_json() {
    let (_tmp, root) = data_dir();
    let scene = run(&root, SceneParams::new());

    let out = root.join("out/nested/scene.json");
    scene.write_json(&out).unwrap();
    let back: Scene = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(back, scene);
}
