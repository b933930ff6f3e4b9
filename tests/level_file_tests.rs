//! Level files on disk through to a playable game

use std::fs;
use std::path::PathBuf;

use cube_blast::adapter::{LevelFile, LevelLibrary};
use cube_blast::core::GameState;
use cube_blast::types::{GameStatus, ObstacleKind, Position};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cube-blast-it-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_level_file_plays() {
    let dir = scratch_dir("plays");
    let path = dir.join("level_01.json");
    fs::write(
        &path,
        r#"{
            "level_number": 1,
            "grid_width": 3,
            "grid_height": 2,
            "move_count": 3,
            "grid": ["y", "y", "v", "rand", "rand", "rand"]
        }"#,
    )
    .unwrap();

    let file = LevelFile::load(&path).unwrap();
    let mut game = GameState::new(file.into(), 4).unwrap();
    assert_eq!(game.goals().remaining(ObstacleKind::Vase), Some(1));

    game.click(Position::new(0, 0)).unwrap();
    // One hit cracks the vase; it needs a second one.
    assert_eq!(game.goals().remaining(ObstacleKind::Vase), Some(1));
    assert_eq!(game.moves_left(), 2);
    assert_eq!(game.status(), GameStatus::InProgress);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_library_numbering() {
    let dir = scratch_dir("library");
    for n in [1, 2, 4] {
        fs::write(
            dir.join(LevelLibrary::file_name(n)),
            format!(
                r#"{{"level_number":{},"grid_width":1,"grid_height":1,"move_count":1,"grid":["r"]}}"#,
                n
            ),
        )
        .unwrap();
    }

    let library = LevelLibrary::load_dir(&dir, 4);
    assert_eq!(library.loaded(), 3);
    assert_eq!(library.get(2).map(|l| l.level_number), Some(2));
    assert!(library.get(3).is_none());
    assert_eq!(library.get(4).map(|l| l.level_number), Some(4));

    let _ = fs::remove_dir_all(&dir);
}
