#![cfg(target_arch = "wasm32")]

use snakesweeper_web::WebGame;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn random_seed_game_starts() {
    let Ok(mut game) = WebGame::new("") else {
        panic!("game should start without arguments");
    };

    assert!(!game.is_finished());
    assert_eq!(game.size(), 10);
    assert!(game.frame_json().is_ok());
}

#[wasm_bindgen_test]
fn unknown_direction_is_a_js_error() {
    let Ok(mut game) = WebGame::new("#--seed=3") else {
        panic!("game should start");
    };

    assert!(game.change_direction("sideways").is_err());
    assert!(matches!(game.change_direction("down"), Ok(true)));
}

#[wasm_bindgen_test]
fn finished_game_stays_finished() {
    let Ok(mut game) = WebGame::new("#--seed=11&--size=8") else {
        panic!("game should start");
    };

    for _ in 0..10_000 {
        game.autopilot();
        if matches!(game.tick(), Ok(true)) {
            break;
        }
    }

    if game.is_finished() {
        assert!(matches!(game.tick(), Ok(true)));
        assert!(!game.autopilot());
        assert!(!game.grow());
    }
}
