#[macro_use]
extern crate bencher;

use bencher::Bencher;
use graphql_query_builder::ast::*;

fn build<'a>(ctx: &'a ASTContext) -> Query<'a> {
    let mut query = Query::new(ctx, OperationKind::Query).with_name(ctx, "Feed");
    for index in 0..20 {
        query.add_fields([Field::new(ctx, "posts")
            .with_alias(ctx, &format!("page{index}"))
            .with_arguments([
                Argument::new(ctx, "first", 25),
                Argument::new(ctx, "after", Value::string(ctx, "cursor")),
                Argument::new(ctx, "tags", Value::string_list(ctx, ["rust", "graphql"])),
                Argument::new(
                    ctx,
                    "where",
                    Value::object(
                        ctx,
                        [
                            Argument::new(ctx, "published", true),
                            Argument::new(ctx, "status", Value::enum_value(ctx, "PUBLIC")),
                        ],
                    ),
                ),
            ])
            .with_fields([
                Field::new(ctx, "id"),
                Field::new(ctx, "title"),
                Field::new(ctx, "author").with_fields([Field::new(ctx, "id"), Field::new(ctx, "name")]),
            ])]);
    }
    query
}

fn graphql_builder_build(bench: &mut Bencher) {
    bench.iter(|| {
        let ctx = ASTContext::new();
        build(&ctx).selection_set.selections.len()
    });
}

fn graphql_builder_validate(bench: &mut Bencher) {
    let ctx = ASTContext::new();
    let query = build(&ctx);
    bench.iter(|| query.validate().unwrap());
}

fn graphql_builder_print(bench: &mut Bencher) {
    let ctx = ASTContext::new();
    let query = build(&ctx);
    bench.iter(|| query.print().unwrap());
}

fn graphql_builder_tokens_count(bench: &mut Bencher) {
    let ctx = ASTContext::new();
    let query = build(&ctx);
    bench.iter(|| query.tokens().unwrap().count());
}

fn graphql_builder_end_to_end(bench: &mut Bencher) {
    bench.iter(|| {
        let ctx = ASTContext::new();
        build(&ctx).print().unwrap()
    });
}

fn graphql_parser_print(bench: &mut Bencher) {
    use graphql_parser::query::parse_query;
    let ctx = ASTContext::new();
    let text = build(&ctx).print().unwrap();
    let ast = parse_query::<&str>(&text).unwrap();
    bench.iter(|| ast.to_string());
}

benchmark_group!(
    render,
    graphql_builder_build,
    graphql_builder_validate,
    graphql_builder_print,
    graphql_builder_tokens_count,
    graphql_builder_end_to_end,
    graphql_parser_print
);

benchmark_main!(render);
