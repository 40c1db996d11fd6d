//! Async lowering (sync strategy) and error-handling strategies.

mod common;

use common::{assert_contains, assert_not_contains, emit_go_for_source, emit_go_with_config,
    transpile_for_test};
use tsgoc::config::{Config, ErrorStrategy};
use tsgoc::diagnostics::Code;

#[test]
fn async_function_gains_context_and_error_pair() {
    let go = emit_go_for_source(
        r#"export async function f(u: string): Promise<string> { return "ok"; }"#,
    );
    assert_contains(&go, "func F(ctx context.Context, u string) (string, error) {");
    assert_contains(&go, "return \"ok\", nil");
    assert_contains(&go, "\"context\"");
}

#[test]
fn void_async_function_returns_error_only() {
    let go = emit_go_for_source(
        "export async function tick(): Promise<void> { return; }",
    );
    assert_contains(&go, "func Tick(ctx context.Context) error {");
    assert_contains(&go, "return nil");
}

#[test]
fn awaited_declarations_consume_the_error_pair() {
    let src = r#"
        export async function fetchData(url: string): Promise<string> {
            return "data";
        }
        export async function load(url: string): Promise<number> {
            const data = await fetchData(url);
            return data.length;
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "data, err := FetchData(ctx, url)");
    assert_contains(&go, "if err != nil {");
    assert_contains(&go, "return 0, err");
    assert_contains(&go, "return len(data), nil");
}

#[test]
fn return_await_passes_the_pair_through() {
    let src = r#"
        export async function inner(): Promise<string> { return "x"; }
        export async function outer(): Promise<string> { return await inner(); }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "return Inner(ctx)");
    // Already a (value, error) pair; no extra nil.
    assert_not_contains(&go, "return Inner(ctx), nil");
}

#[test]
fn async_callers_without_context_use_background() {
    let src = r#"
        export async function work(): Promise<string> { return "w"; }
        export function kick(): void {
            work();
        }
    "#;
    let go = emit_go_for_source(src);
    assert_contains(&go, "Work(context.Background())");
}

#[test]
fn throw_under_return_strategy_becomes_an_error_return() {
    let go = emit_go_for_source(
        r#"export async function boom(): Promise<string> { throw new Error("bad"); }"#,
    );
    assert_contains(&go, "return \"\", fmt.Errorf(\"bad\")");
}

#[test]
fn throw_outside_error_functions_panics() {
    let go = emit_go_for_source(
        r#"export function die(): void { throw new Error("bad"); }"#,
    );
    assert_contains(&go, "panic(fmt.Errorf(\"bad\"))");
}

#[test]
fn try_catch_under_panic_strategy_uses_deferred_recover() {
    let config = Config {
        error_handling: ErrorStrategy::Panic,
        ..Config::default()
    };
    let src = r#"
        export function risky(): void {
            try {
                attempt();
            } catch (e) {
                console.log(e);
            } finally {
                console.log("done");
            }
        }
    "#;
    let go = emit_go_with_config(src, &config);
    assert_contains(&go, "func() {");
    assert_contains(&go, "if e := recover(); e != nil {");
    assert_contains(&go, "fmt.Println(e)");
    // The finalizer is its own deferred function and registers first, so it
    // runs after the recover handler.
    let finalizer_pos = go.find("fmt.Println(\"done\")").expect("finalizer body");
    let recover_pos = go.find("recover()").expect("recover handler");
    assert!(finalizer_pos < recover_pos);
}

#[test]
fn try_catch_under_return_strategy_is_refused() {
    let src = r#"
        export function risky(): void {
            try {
                attempt();
            } catch (e) {
                console.log(e);
            }
        }
    "#;
    let module = transpile_for_test(src, &Config::default());
    assert_contains(
        &module.code,
        "// tsgo: try/catch omitted under errorHandling=return",
    );
    assert!(
        module.diagnostics.iter().any(|d| d.code == Code::E3001),
        "expected E3001 for try/catch under the return strategy"
    );
    // The protected block still runs.
    assert_contains(&module.code, "attempt()");
}

#[test]
fn future_strategy_stubs_to_sync_lowering() {
    let config = Config {
        async_strategy: tsgoc::config::AsyncStrategy::Future,
        ..Config::default()
    };
    let go = emit_go_with_config(
        r#"export async function f(): Promise<string> { return "ok"; }"#,
        &config,
    );
    assert_contains(&go, "func F(ctx context.Context) (string, error) {");
}
