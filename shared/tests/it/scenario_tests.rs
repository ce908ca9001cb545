//! Drag, commit, undo and clear sequences.

use crate::helpers::{
    drag, expected_screen, on_screen, rect_board, shape, TestBoardBuilder, HEIGHT, WIDTH,
};
use canvasquare_shared::{DrawMode, LeavePolicy, Point};

#[test]
fn test_drag_commits_one_shape() {
    let mut board = rect_board();
    assert!(board.begin(Point::new(10.0, 10.0)));
    board.update(Point::new(100.0, 80.0));
    board.end(Point::new(100.0, 80.0));

    assert_eq!(board.shapes(), &[shape(10.0, 10.0, 100.0, 80.0)]);
    assert!(!board.is_dragging());
}

#[test]
fn test_release_outside_is_clamped() {
    let mut board = rect_board();
    board.begin(Point::new(10.0, 10.0));
    board.end(Point::new(600.0, 400.0));

    assert_eq!(board.shapes(), &[shape(10.0, 10.0, WIDTH, HEIGHT)]);
}

#[test]
fn test_release_clamps_axes_independently() {
    let mut board = rect_board();
    board.begin(Point::new(300.0, 300.0));
    board.end(Point::new(-25.0, 200.0));

    assert_eq!(board.shapes(), &[shape(300.0, 300.0, 0.0, 200.0)]);
}

#[test]
fn test_commit_keeps_release_point_not_last_update() {
    let mut board = rect_board();
    board.begin(Point::new(10.0, 10.0));
    board.update(Point::new(50.0, 50.0));
    board.end(Point::new(70.0, 20.0));

    assert_eq!(board.shapes(), &[shape(10.0, 10.0, 70.0, 20.0)]);
}

#[test]
fn test_begin_outside_never_drags() {
    let mut board = rect_board();
    assert!(!board.begin(Point::new(-5.0, 5.0)));
    assert!(!board.is_dragging());

    board.update(Point::new(30.0, 30.0));
    assert_eq!(board.end(Point::new(50.0, 50.0)), None);
    assert!(board.shapes().is_empty());
}

#[test]
fn test_begin_on_edge_is_accepted() {
    let mut board = rect_board();
    assert!(board.begin(Point::new(WIDTH, HEIGHT)));
    board.end(Point::new(0.0, 0.0));

    assert_eq!(board.shapes(), &[shape(WIDTH, HEIGHT, 0.0, 0.0)]);
}

#[test]
fn test_end_outside_rect_mode_never_commits() {
    for mode in [DrawMode::Disabled, DrawMode::Free] {
        let mut board = TestBoardBuilder::new().with_mode(mode).build();
        board.begin(Point::new(10.0, 10.0));
        board.update(Point::new(40.0, 40.0));
        assert_eq!(board.end(Point::new(40.0, 40.0)), None);
        assert!(board.shapes().is_empty());
    }
}

#[test]
fn test_end_without_begin_is_noop() {
    let mut board = TestBoardBuilder::new()
        .with_shape((1.0, 1.0), (2.0, 2.0))
        .build();
    assert_eq!(board.end(Point::new(50.0, 50.0)), None);
    assert_eq!(board.end(Point::new(50.0, 50.0)), None);
    assert_eq!(board.shapes().len(), 1);
}

#[test]
fn test_set_mode_applies_to_next_begin() {
    let mut board = TestBoardBuilder::new().with_mode(DrawMode::Disabled).build();
    assert!(!board.begin(Point::new(10.0, 10.0)));

    board.set_mode(DrawMode::Rect);
    assert!(board.begin(Point::new(10.0, 10.0)));
    board.end(Point::new(20.0, 30.0));
    assert_eq!(board.shapes(), &[shape(10.0, 10.0, 20.0, 30.0)]);
}

#[test]
fn test_undo_removes_latest_shape() {
    let mut board = TestBoardBuilder::new()
        .with_shape((10.0, 10.0), (100.0, 80.0))
        .with_shape((200.0, 200.0), (250.0, 300.0))
        .build();
    assert_eq!(board.shapes().len(), 2);

    assert_eq!(board.undo(), Some(shape(200.0, 200.0, 250.0, 300.0)));
    assert_eq!(board.shapes(), &[shape(10.0, 10.0, 100.0, 80.0)]);
    assert_eq!(on_screen(&board), expected_screen(board.shapes(), None));
}

#[test]
fn test_undo_on_empty_list() {
    let mut board = rect_board();
    assert_eq!(board.undo(), None);
    assert_eq!(board.shapes().len(), 0);
    assert_eq!(board.mode(), DrawMode::Rect);
}

#[test]
fn test_undo_keeps_mode_and_drag() {
    let mut board = TestBoardBuilder::new()
        .with_shape((10.0, 10.0), (20.0, 20.0))
        .build();
    board.begin(Point::new(30.0, 30.0));
    board.update(Point::new(60.0, 60.0));
    board.undo();

    assert!(board.is_dragging());
    assert_eq!(board.mode(), DrawMode::Rect);
    assert_eq!(
        on_screen(&board),
        expected_screen(&[], Some((Point::new(30.0, 30.0), Point::new(60.0, 60.0))))
    );
}

#[test]
fn test_clear_always_empties_and_disables() {
    let mut board = TestBoardBuilder::new()
        .with_shape((10.0, 10.0), (20.0, 20.0))
        .with_shape((30.0, 30.0), (40.0, 40.0))
        .build();
    board.clear();
    assert!(board.shapes().is_empty());
    assert_eq!(board.mode(), DrawMode::Disabled);
    assert!(on_screen(&board).is_empty());

    let mut empty = TestBoardBuilder::new().with_mode(DrawMode::Free).build();
    empty.clear();
    assert!(empty.shapes().is_empty());
    assert_eq!(empty.mode(), DrawMode::Disabled);
}

#[test]
fn test_screen_tracks_committed_state() {
    let mut board = TestBoardBuilder::new()
        .with_shape((10.0, 10.0), (100.0, 80.0))
        .build();

    board.begin(Point::new(300.0, 200.0));
    board.update(Point::new(250.0, 500.0));
    assert_eq!(
        on_screen(&board),
        expected_screen(
            board.shapes(),
            Some((Point::new(300.0, 200.0), Point::new(250.0, 500.0)))
        )
    );

    board.end(Point::new(250.0, 500.0));
    assert_eq!(on_screen(&board), expected_screen(board.shapes(), None));
    assert_eq!(board.shapes()[1], shape(300.0, 200.0, 250.0, HEIGHT));
}

#[test]
fn test_leave_commits_by_default() {
    let mut board = rect_board();
    board.begin(Point::new(10.0, 10.0));
    board.update(Point::new(580.0, 100.0));
    board.cancel(Point::new(580.0, 100.0));

    assert_eq!(board.shapes(), &[shape(10.0, 10.0, WIDTH, 100.0)]);
}

#[test]
fn test_leave_can_discard() {
    let mut board = TestBoardBuilder::new()
        .with_leave_policy(LeavePolicy::Discard)
        .with_shape((10.0, 10.0), (20.0, 20.0))
        .build();
    board.begin(Point::new(50.0, 50.0));
    board.update(Point::new(580.0, 100.0));
    assert_eq!(board.cancel(Point::new(580.0, 100.0)), None);

    assert_eq!(board.shapes().len(), 1);
    assert!(!board.is_dragging());
    assert_eq!(on_screen(&board), expected_screen(board.shapes(), None));
}

#[test]
fn test_repaint_is_a_function_of_state() {
    let mut board = TestBoardBuilder::new()
        .with_shape((10.0, 10.0), (100.0, 80.0))
        .with_shape((90.0, 5.0), (3.0, 200.0))
        .build();
    board.begin(Point::new(1.0, 1.0));
    board.update(Point::new(-9.0, 700.0));

    board.surface_mut().take();
    board.repaint();
    let first = board.surface_mut().take();
    board.repaint();
    let second = board.surface_mut().take();
    assert_eq!(first, second);
}

#[test]
fn test_committed_shapes_survive_later_drags() {
    let mut board = rect_board();
    let first = drag(&mut board, Point::new(10.0, 10.0), Point::new(20.0, 20.0));
    drag(&mut board, Point::new(30.0, 30.0), Point::new(40.0, 40.0));
    drag(&mut board, Point::new(-1.0, 30.0), Point::new(40.0, 40.0));

    assert_eq!(board.shapes().len(), 2);
    assert_eq!(board.shapes().first().copied(), first);
}
