macro_rules! out {
    ($cnt: expr, $ctx: expr) => {
        $ctx.interface().out($cnt).await?;
        return Ok(());
    };
}

macro_rules! hid {
    ($cnt: expr, $ctx: expr) => {
        $ctx.interface().hid($cnt).await?;
        return Ok(());
    };
}

macro_rules! upd {
    ($cnt: expr, $ctx: expr) => {
        $ctx.interface().update_message($cnt).await?;
        return Ok(());
    };
}

macro_rules! generate_hid_variants {
    ($($name: ident => $emoji: ident),+$(,)?) => {
        $(
            macro_rules! $name {
                ($cnt: expr, $ctx: expr) => {
                    crate::command::macros::hid!(format!("{} {}", crate::core::konst::exit_code::$emoji, $cnt), $ctx);
                };
            }
        )+
    };
}

generate_hid_variants! {
    note => NOTICE,
    bad => INVALID,
}

pub(crate) use {bad, hid, note, out, upd};
